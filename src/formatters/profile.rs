use log::debug;
use serde_json::Value;

use super::numbers::format_number;
use super::{View, NOT_AVAILABLE};
use crate::errors::Result;
use crate::models::records::CompanyProfile;
use crate::render::{Element, Tag};
use crate::util::or_na;

pub const NO_PROFILE: &str = "No profile data available";

/// 公司资料卡片：基本信息 / 财务指标 / 公司详情 三栏
///
/// 对象按字段渲染；数组取第一项，空数组给出提示语；
/// 其余标量（例如后端直接返回的表格文本）没有任何可用字段，渲染为全部 N/A 的卡片。
pub fn format_profile(data: &Value) -> Result<View> {
    // 数据源返回的是单元素数组时取第一项
    let record = match data {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return Ok(View::Notice(NO_PROFILE.to_string())),
        },
        other => other,
    };

    let profile: CompanyProfile = match record {
        Value::Object(_) => serde_json::from_value(record.clone())?,
        other => {
            debug!("Company profile payload is not an object ({}), rendering empty card", kind(other));
            CompanyProfile::default()
        }
    };
    debug!("Formatting company profile for {:?}", profile.symbol);
    Ok(View::Tree(profile_card(&profile).into()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn profile_card(p: &CompanyProfile) -> Element {
    let (low, high) = p.week52_bounds();

    let basic = section("Basic Information")
        .child(field_with_class("Symbol:", or_na(&p.symbol), "symbol"))
        .child(field("Exchange:", p.exchange.clone().or_else(|| p.exchange_short_name.clone())))
        .child(field("Industry:", p.industry.clone()))
        .child(field("Sector:", p.sector.clone()))
        .child(field("Country:", p.country.clone()))
        .child(field("Currency:", p.currency.clone()));

    let metrics = section("Financial Metrics")
        .child(field_with_class("Market Cap:", format_number(p.mkt_cap), "number"))
        .child(field("Beta:", Some(format_number(p.beta))))
        .child(field_with_class("52 Week High:", format_number(high), "number"))
        .child(field_with_class("52 Week Low:", format_number(low), "number"))
        .child(field_with_class("Price:", format_number(p.price), "number"))
        .child(field_with_class("Volume:", format_number(p.display_volume()), "number"));

    let details = section("Company Details")
        .child(field("CEO:", p.ceo.clone()))
        .child(field("Employees:", Some(format_number(p.headcount()))))
        .child(field("Founded:", p.ipo_date.clone()))
        .child(website_field(p.website.as_deref()))
        .child(field("Address:", p.address.clone()))
        .child(field("City:", p.city.clone()))
        .child(field("State:", p.state.clone()));

    Element::new(Tag::Div)
        .class("profile-card")
        .child(Element::new(Tag::H2).text(p.display_name().unwrap_or("Company Profile")))
        .child(
            Element::new(Tag::Div)
                .class("profile-grid")
                .child(basic)
                .child(metrics)
                .child(details),
        )
}

fn section(title: &str) -> Element {
    Element::new(Tag::Div)
        .class("profile-section")
        .child(Element::new(Tag::H3).text(title))
}

fn label(text: &str) -> Element {
    Element::new(Tag::Span).class("label").text(text)
}

fn field(name: &str, value: Option<String>) -> Element {
    Element::new(Tag::P)
        .child(label(name))
        .text(" ")
        .text(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

fn field_with_class(name: &str, value: String, class: &str) -> Element {
    Element::new(Tag::P)
        .child(label(name))
        .text(" ")
        .child(Element::new(Tag::Span).class(class).text(value))
}

// 只接受 http(s) 链接，其余一律退化为 "#"
fn website_field(website: Option<&str>) -> Element {
    let href = website
        .filter(|w| w.starts_with("http://") || w.starts_with("https://"))
        .unwrap_or("#");
    Element::new(Tag::P).child(label("Website:")).text(" ").child(
        Element::new(Tag::A)
            .attr("href", href)
            .attr("target", "_blank")
            .text(website.unwrap_or(NOT_AVAILABLE)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_html, render_text, Node};
    use serde_json::json;

    fn render(data: Value) -> String {
        match format_profile(&data).unwrap() {
            View::Tree(node) => render_text(&node),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn splits_range_into_high_and_low() {
        let text = render(json!({"symbol": "AAPL", "range": "100.50-150.75"}));
        assert!(text.contains("52 Week High: 150.75"));
        assert!(text.contains("52 Week Low: 100.50"));
    }

    #[test]
    fn missing_fields_render_na() {
        let text = render(json!({}));
        assert!(text.starts_with("Company Profile\n"));
        for line in [
            "Symbol: N/A",
            "Exchange: N/A",
            "Market Cap: N/A",
            "52 Week High: N/A",
            "52 Week Low: N/A",
            "CEO: N/A",
            "Employees: N/A",
            "Website: N/A",
            "State: N/A",
        ] {
            assert!(text.contains(line), "missing {:?} in\n{}", line, text);
        }
    }

    #[test]
    fn renders_sections_and_numbers() {
        let text = render(json!([{
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "exchangeShortName": "NASDAQ",
            "mktCap": 2950000000000.0,
            "beta": 1.286,
            "price": 190.5,
            "volAvg": 58405568,
            "fullTimeEmployees": "161000",
            "ipoDate": "1980-12-12"
        }]));
        assert!(text.starts_with("Apple Inc.\n=========="));
        assert!(text.contains("Basic Information"));
        assert!(text.contains("Financial Metrics"));
        assert!(text.contains("Company Details"));
        assert!(text.contains("Exchange: NASDAQ"));
        assert!(text.contains("Market Cap: 2,950,000,000,000.00"));
        assert!(text.contains("Beta: 1.29"));
        assert!(text.contains("Volume: 58,405,568.00"));
        assert!(text.contains("Employees: 161,000.00"));
        assert!(text.contains("Founded: 1980-12-12"));
    }

    #[test]
    fn website_link_is_sanitised() {
        let card: Node = profile_card(&CompanyProfile {
            website: Some("javascript:alert(1)".into()),
            ..Default::default()
        })
        .into();
        let html = render_html(&card);
        assert!(html.contains("<a href=\"#\" target=\"_blank\">javascript:alert(1)</a>"));

        let card: Node = profile_card(&CompanyProfile {
            website: Some("https://www.apple.com".into()),
            ..Default::default()
        })
        .into();
        assert!(render_html(&card).contains("href=\"https://www.apple.com\""));
    }

    #[test]
    fn scalar_payload_renders_empty_card() {
        let table = "╒════════╤═══════╕\n│ symbol │ AAPL  │\n╘════════╧═══════╛";
        let text = render(json!(table));
        assert_eq!(text, render(json!({})));
        assert!(text.starts_with("Company Profile\n"));
        assert!(text.contains("Symbol: N/A"));
        assert!(text.contains("Volume: N/A"));
        assert!(!text.contains("AAPL"));

        assert_eq!(render(json!(42)), render(json!({})));
        assert_eq!(render(json!(["AAPL"])), render(json!({})));
        assert_eq!(
            format_profile(&json!([])).unwrap(),
            View::Notice(NO_PROFILE.to_string())
        );
    }
}
