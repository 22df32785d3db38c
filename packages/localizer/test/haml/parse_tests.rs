//! Segment scanner and extraction tests

use std::sync::Arc;

use haml_localizer::{HamlFile, Project};

fn parse(src: &str) -> HamlFile {
    let mut file = HamlFile::standalone(
        Arc::new(Project::new("webapp")),
        "app/views/test.html.haml",
    );
    file.parse(src);
    file
}

fn sources(file: &HamlFile) -> Vec<String> {
    file.get_translation_set()
        .get_all()
        .iter()
        .map(|r| r.source.clone())
        .collect()
}

fn key_of(file: &HamlFile, source: &str) -> String {
    file.get_translation_set()
        .get_by_source(source)
        .unwrap_or_else(|| panic!("no resource with source {:?}", source))
        .key
        .clone()
}

#[test]
fn simple_text_line() {
    let file = parse("  This is a test.\n");
    assert_eq!(sources(&file), vec!["This is a test."]);
    assert_eq!(key_of(&file, "This is a test."), "r112256965");

    let res = file.get_translation_set().get_by_source("This is a test.").unwrap();
    assert_eq!(res.datatype, "x-haml");
    assert_eq!(res.path_name, "app/views/test.html.haml");
    assert!(res.auto_key);
}

#[test]
fn consecutive_lines_at_same_indent_merge() {
    let file = parse("  This is a test.\n  This is more text at the same indentation level.\n");
    assert_eq!(
        sources(&file),
        vec!["This is a test. This is more text at the same indentation level."]
    );
    assert_eq!(
        key_of(
            &file,
            "This is a test. This is more text at the same indentation level."
        ),
        "r130670021"
    );
}

#[test]
fn deeper_line_continues_the_unit() {
    let file = parse("  This is a test.\n    This is more text at a different indentation level.\n");
    assert_eq!(
        key_of(
            &file,
            "This is a test. This is more text at a different indentation level."
        ),
        "r783876767"
    );
}

#[test]
fn dedent_starts_a_new_unit() {
    let file = parse("    This is a test.\n  This is more text at a different indentation level.\n");
    assert_eq!(sources(&file).len(), 2);
    assert_eq!(key_of(&file, "This is a test."), "r112256965");
    assert_eq!(
        key_of(&file, "This is more text at a different indentation level."),
        "r464867050"
    );
}

#[test]
fn blank_line_splits_units() {
    let file = parse("  This is a test.\n\n  A different string.\n");
    assert_eq!(sources(&file), vec!["This is a test.", "A different string."]);
    assert_eq!(key_of(&file, "A different string."), "r216287039");
}

#[test]
fn breaking_tag_text_is_its_own_unit() {
    let file = parse("  %p A different string.\n  Not indented.\n");
    assert_eq!(sources(&file), vec!["A different string.", "Not indented."]);
    assert_eq!(key_of(&file, "Not indented."), "r313193297");
}

#[test]
fn nonbreaking_tag_merges_into_sentence() {
    let file = parse("  This is a test of\n  %b bold text\n  embedded in the sentence.\n");
    assert_eq!(
        sources(&file),
        vec!["This is a test of <b>bold text</b> embedded in the sentence."]
    );
    assert_eq!(
        key_of(
            &file,
            "This is a test of <b>bold text</b> embedded in the sentence."
        ),
        "r425499692"
    );
}

#[test]
fn nonbreaking_tag_with_attributes_merges() {
    let file = parse(
        "  This is a test of the\n  %a.data.icon{:href=>\"/pages/contact_us\"} non-breaking\n  tags.\n",
    );
    assert_eq!(
        key_of(
            &file,
            "This is a test of the <a class=\"data icon\" href=\"/pages/contact_us\">non-breaking</a> tags."
        ),
        "r198921042"
    );
}

#[test]
fn self_closing_br_merges() {
    let file = parse("  This is\n  %br/\n  Spinal Tap.\n");
    assert_eq!(sources(&file), vec!["This is <br/> Spinal Tap."]);
}

#[test]
fn nonbreaking_tag_with_only_children_does_not_merge() {
    let src = "            Message\n          \
               %a.btn.grey.recommend_friend{:href=>\"#{url}\"}\n            \
               %span.check_icon\n            Recommend\n";
    let file = parse(src);
    assert_eq!(sources(&file), vec!["Message", "Recommend"]);
    assert_eq!(key_of(&file, "Message"), "r727846503");
    assert_eq!(key_of(&file, "Recommend"), "r108032100");
}

#[test]
fn comments_and_their_blocks_are_skipped() {
    let file = parse("/ this is a comment\n  and this continues it\nThis is a test.\n");
    assert_eq!(sources(&file), vec!["This is a test."]);

    let file = parse("-# silent comment\n  with continuation\nThis is a test.\n");
    assert_eq!(sources(&file), vec!["This is a test."]);
}

#[test]
fn dash_space_hash_comment_block_is_skipped() {
    let file = parse("- # haml comment\n  continuation\nThis is a test.\n");
    assert_eq!(sources(&file), vec!["This is a test."]);
}

#[test]
fn dash_interpolation_is_code_not_comment() {
    // `- #{...}` is a Ruby statement, so its children are still scanned
    let file = parse("- #{helper}\n  Child text.\n");
    assert_eq!(sources(&file), vec!["Child text."]);
}

#[test]
fn ruby_filter_block_is_skipped() {
    let file = parse(":ruby\n  x = 5\n  y = x + 1\nThis is a test.\n");
    assert_eq!(sources(&file), vec!["This is a test."]);
}

#[test]
fn code_lines_are_skipped_but_children_are_scanned() {
    let file = parse("- if @friend.active?\n  Positive.\n- else\n  Negative.\n");
    assert_eq!(sources(&file), vec!["Positive.", "Negative."]);
    assert_eq!(key_of(&file, "Positive."), "r389103942");
    assert_eq!(key_of(&file, "Negative."), "r1006126501");
}

#[test]
fn text_under_a_code_output_line_is_scanned() {
    let file = parse("  = render :partial => 'top'\n    Indented text.\n");
    assert_eq!(sources(&file), vec!["Indented text."]);
}

#[test]
fn pipe_multiline_code_is_one_statement() {
    let file = parse(
        "= func(                 |\n    \"param1\",           |\n    \"param2\")           |\nNot indented.\n",
    );
    assert_eq!(sources(&file), vec!["Not indented."]);
}

#[test]
fn unbalanced_bracket_consumes_continuation_lines() {
    let file = parse(
        "- paragraphs = [\"Dear #{@friend.to_s(true, true)},\",\n    \"Thank you.\",\n    \"Sincerely, the Team\"]\nNot indented.\n",
    );
    assert_eq!(sources(&file), vec!["Not indented."]);
}

#[test]
fn doctype_is_skipped_but_bang_text_is_text() {
    let file = parse("!!! XML\nThis is a test.\n");
    assert_eq!(sources(&file), vec!["This is a test."]);

    let file = parse("! Frameset This is a test\n");
    assert_eq!(key_of(&file, "! Frameset This is a test"), "r414916314");
}

#[test]
fn entities_are_decoded_in_source() {
    let file = parse("&amp; This is a test.\n");
    assert_eq!(key_of(&file, "& This is a test."), "r470281808");

    let file = parse("Read more&nbsp;&rsaquo;\n");
    assert_eq!(
        key_of(&file, "Read more\u{00A0}\u{203A}"),
        "r818505217"
    );
}

#[test]
fn interpolation_is_kept_verbatim_in_text() {
    let file = parse("  There are #{group.count(:friend).uniq} friends.\n");
    assert_eq!(
        key_of(&file, "There are #{group.count(:friend).uniq} friends."),
        "r858463218"
    );
}

#[test]
fn interpolation_at_line_start_is_text() {
    let file = parse("  This is a test.\n  #{abc} A different string.\n  Not indented.\n");
    assert_eq!(
        key_of(&file, "This is a test. #{abc} A different string. Not indented."),
        "r356714989"
    );
}

#[test]
fn units_without_prose_are_not_extracted() {
    assert!(sources(&parse("%div{:attr => 'value'} #{this should be ignored}\n")).is_empty());
    assert!(sources(&parse("%div{:attr => 'value'} <img src=\"foo.png\"/>\n")).is_empty());
    assert!(sources(&parse("  .,$#$@%\n")).is_empty());
}

#[test]
fn code_output_tag_line_is_not_extracted() {
    assert!(sources(&parse("%p= post.title\n")).is_empty());
    assert!(sources(&parse("  %span{:itemprop=>\"author\"}= post.author.name\n")).is_empty());
}

#[test]
fn nonconvertible_tag_text_is_still_extracted() {
    let file = parse("    %span.text{:class=>page=='smile' ? 'active' : 'hidden'} &#8250; Smile\n");
    assert_eq!(sources(&file), vec!["\u{203A} Smile"]);
}

#[test]
fn segments_reconstruct_the_source() {
    let src = "-# header\n  continued\n!!! XML\n%div\n  %p This is a test.\n\n  :ruby\n    x = 5\n  Plain text at the end.\n";
    let file = parse(src);
    let rebuilt: String = file.segments().iter().map(|s| s.original.clone()).collect();
    assert_eq!(rebuilt, src);
}
