//! Element parsing and tag conversion tests

use haml_localizer::haml::tag::{
    convert, first_localizable, is_nonbreaking, scan_element, TagConversion,
};

fn lines(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| s.to_string()).collect()
}

fn open_of(line: &str, col: usize) -> String {
    let l = lines(&[line]);
    let el = scan_element(&l, 0, col).expect("element should parse");
    match convert(&el) {
        TagConversion::Converted { open, .. } => open,
        TagConversion::NotConvertible => panic!("not convertible: {}", line),
    }
}

#[test]
fn bare_tag() {
    assert_eq!(open_of("  %b testing", 2), "<b>");
}

#[test]
fn hashrocket_attribute_keeps_single_quotes() {
    assert_eq!(
        open_of("  %b{ :class => 'foo' } testing", 2),
        "<b class='foo'>"
    );
}

#[test]
fn colon_syntax_attribute() {
    assert_eq!(
        open_of("  %b{ class: 'foo' } testing", 2),
        "<b class='foo'>"
    );
}

#[test]
fn attribute_order_is_preserved() {
    assert_eq!(
        open_of(
            "  %p{:id=>'newpara2', :name=>\"asdf\", :class=>'foo'} text",
            2
        ),
        "<p id='newpara2' name=\"asdf\" class='foo'>"
    );
}

#[test]
fn class_shorthand_merges_with_href() {
    assert_eq!(
        open_of("  %a.data.icon{:href=>\"/pages/contact_us\"} Contact", 2),
        "<a class=\"data icon\" href=\"/pages/contact_us\">"
    );
}

#[test]
fn id_shorthand_comes_first() {
    assert_eq!(
        open_of("  %span#data-part.foo.bar text", 2),
        "<span id=\"data-part\" class=\"foo bar\">"
    );
}

#[test]
fn bare_class_chain_is_a_div() {
    assert_eq!(open_of(".a.b text", 0), "<div class=\"a b\">");
}

#[test]
fn interpolated_value_is_still_a_literal() {
    assert_eq!(
        open_of("  %a{:href=>\"#{job['url']}\"} apply", 2),
        "<a href=\"#{job['url']}\">"
    );
}

#[test]
fn self_closing_br() {
    let l = lines(&["%br/"]);
    let el = scan_element(&l, 0, 0).unwrap();
    match convert(&el) {
        TagConversion::Converted {
            open, self_closing, ..
        } => {
            assert_eq!(open, "<br/>");
            assert!(self_closing);
        }
        TagConversion::NotConvertible => panic!("br should convert"),
    }
}

#[test]
fn computed_attribute_is_not_convertible() {
    let l = lines(&["    %span.text{:class=>page=='smile' ? 'active' : 'hidden'} tail"]);
    let el = scan_element(&l, 0, 4).unwrap();
    assert_eq!(convert(&el), TagConversion::NotConvertible);
}

#[test]
fn close_tag_matches_name() {
    let l = lines(&["  %strong words"]);
    let el = scan_element(&l, 0, 2).unwrap();
    match convert(&el) {
        TagConversion::Converted { close, .. } => assert_eq!(close, "</strong>"),
        TagConversion::NotConvertible => panic!("should convert"),
    }
}

#[test]
fn first_localizable_positions() {
    assert_eq!(first_localizable(&lines(&["  %p This is a test."]), 0, 2), (0, 5));
    assert_eq!(first_localizable(&lines(&["%p Text"]), 0, 0), (0, 3));
    assert_eq!(first_localizable(&lines(&["  %p{:a => 'b'} Text"]), 0, 2), (0, 16));
    assert_eq!(first_localizable(&lines(&["  %p{:a => 'b'}   Text"]), 0, 2), (0, 18));
    assert_eq!(first_localizable(&lines(&["  %p<>/ Text"]), 0, 2), (0, 8));
    assert_eq!(first_localizable(&lines(&["  %p= expr"]), 0, 2), (0, 6));
}

#[test]
fn attribute_hash_spanning_lines() {
    let l = lines(&["  %p{ :a => 'b',", "       :c => 'd' } Trailing text"]);
    let (line, col) = first_localizable(&l, 0, 2);
    assert_eq!(line, 1);
    assert_eq!(col, 19);
}

#[test]
fn nonbreaking_table() {
    for tag in ["a", "b", "span", "em", "strong", "br", "abbr", "sub"] {
        assert!(is_nonbreaking(tag), "{} should be non-breaking", tag);
    }
    for tag in ["p", "div", "li", "td", "h1"] {
        assert!(!is_nonbreaking(tag), "{} should break", tag);
    }
}
