//! Scenario tests for the parsing module.
//!
//! Every tree produced here is also run through the `invariants` checker.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Context, Element, HandlerRegistry, Nesting, Node, Parser, PatternHandler, Probe,
    handlers::kinds::Emphasis,
    node::Child,
    parse_str,
};

fn t(text: &str) -> Child {
    Child::from(text)
}

fn el(element: Element, children: impl IntoIterator<Item = Child>) -> Child {
    Node::with_children(element, children).into()
}

fn root(children: impl IntoIterator<Item = Child>) -> Node {
    Node::with_children(Element::Root, children)
}

fn parsed(input: &str) -> Node {
    let node = parse_str(input);
    invariants::check(&node);
    node
}

const CORPUS: &[&str] = &[
    "# Title\nHello **world**, see [x](http://e).",
    "a # b\n# b",
    "`**bold**` and **x** and *y* and ***z***",
    "- one\n- two\n1. three\n  + four",
    "> quote with `code`\n---\ntext",
    "[a][b](c) [**Docs**](http://docs) [abc",
    "```rust\nfn main() {}\n```\nafter",
    "snake_case_name _it_ __bold__ ~~gone~~",
    "é *ü* ** ** *** x",
    "## `*x*` y\n***\n___x",
];

// Scenarios

#[test]
fn round_trip_scenario() {
    let tree = parsed("# Title\nHello **world**, see [x](http://e).");
    let link = Node::with_children(Element::Link, [t("x")]).with_attribute("href", "http://e");
    assert_eq!(
        tree,
        root([
            el(Element::Heading(1), [t("Title")]),
            t("\nHello "),
            el(Element::Strong, [t("world")]),
            t(", see "),
            link.into(),
            t("."),
        ])
    );
}

#[test]
fn markers_inside_code_are_literal() {
    assert_eq!(
        parsed("`**bold**`"),
        root([el(Element::Code, [t("**bold**")])])
    );
}

#[test]
fn double_marker_is_bold_not_nested_italics() {
    assert_eq!(parsed("**x**"), root([el(Element::Strong, [t("x")])]));
}

#[test]
fn heading_requires_line_start() {
    assert_eq!(parsed("a # b"), root([t("a # b")]));
    assert_eq!(
        parsed("a\n# b"),
        root([t("a"), t("\n"), el(Element::Heading(1), [t("b")])])
    );
}

#[test]
fn unclosed_link_has_no_href() {
    let tree = parsed("[abc");
    let link = tree.nodes().next().expect("link node");
    assert_eq!(link.element, Element::Link);
    assert_eq!(link.children, vec![t("abc")]);
    assert_eq!(link.attributes.get("href"), None);
}

#[test]
fn link_bail_out_hands_character_back() {
    let failed = Node::with_children(Element::Link, [t("a")]).with_attribute("phase", "between");
    let ok = Node::with_children(Element::Link, [t("b")]).with_attribute("href", "c");
    assert_eq!(parsed("[a][b](c)"), root([failed.into(), ok.into()]));
}

#[test]
fn link_text_allows_inline_formatting() {
    let link = Node::with_children(Element::Link, [el(Element::Strong, [t("Docs")])])
        .with_attribute("href", "u");
    assert_eq!(parsed("[**Docs**](u)"), root([link.into()]));
}

#[test]
fn partial_link_mid_stream() {
    let mut parser = Parser::default();
    let tree = parser.parse("see [docs](http://ex");
    let link = tree.nodes().next().expect("link node");
    assert_eq!(link.attributes.get("phase"), Some("url"));
    assert_eq!(link.attributes.get("href"), Some("http://ex"));
}

#[test]
fn emphasis_inside_heading() {
    assert_eq!(
        parsed("# a *b* c\n"),
        root([
            el(Element::Heading(1), [t("a "), el(Element::Em, [t("b")]), t(" c")]),
            t("\n"),
        ])
    );
}

#[test]
fn heading_does_not_nest_blocks() {
    assert_eq!(
        parsed("# > x"),
        root([el(Element::Heading(1), [t("> x")])])
    );
}

#[test]
fn code_span_inside_heading() {
    assert_eq!(
        parsed("## `*x*` y"),
        root([el(
            Element::Heading(2),
            [el(Element::Code, [t("*x*")]), t(" y")]
        )])
    );
}

#[test]
fn italic_inside_bold() {
    assert_eq!(
        parsed("**a *b* c**"),
        root([el(
            Element::Strong,
            [t("a "), el(Element::Em, [t("b")]), t(" c")]
        )])
    );
}

#[rstest]
#[case("~~gone~~", Element::Del, "gone")]
#[case("_it_", Element::Em, "it")]
#[case("__bold__", Element::Strong, "bold")]
fn marker_styles(#[case] input: &str, #[case] element: Element, #[case] text: &str) {
    assert_eq!(parsed(input), root([el(element, [t(text)])]));
}

#[test]
fn em_strong_mid_line() {
    assert_eq!(
        parsed("a ***b*** c"),
        root([t("a "), el(Element::EmStrong, [t("b")]), t(" c")])
    );
}

#[test]
fn intraword_underscores_stay_text() {
    assert_eq!(parsed("snake_case_name"), root([t("snake_case_name")]));
}

#[test]
fn spaced_markers_stay_text() {
    assert_eq!(parsed("** **"), root([t("** **")]));
}

#[test]
fn list_items_are_standalone_nodes() {
    assert_eq!(
        parsed("- one\n- two"),
        root([
            el(Element::UnorderedList, [t("one")]),
            t("\n"),
            el(Element::UnorderedList, [t("two")]),
        ])
    );
}

#[test]
fn list_item_attributes() {
    let numbered = Node::with_children(Element::OrderedList, [t("a")]).with_attribute("start", "1");
    assert_eq!(parsed("1. a"), root([numbered.into()]));

    let indented =
        Node::with_children(Element::UnorderedList, [t("x")]).with_attribute("indent", "2");
    assert_eq!(parsed("  - x"), root([indented.into()]));
}

#[test]
fn blockquote_with_inline_content() {
    assert_eq!(
        parsed("> **q**\nafter"),
        root([
            el(Element::Blockquote, [el(Element::Strong, [t("q")])]),
            t("\nafter"),
        ])
    );
}

#[test]
fn horizontal_rule() {
    assert_eq!(
        parsed("---\ntext"),
        root([el(Element::HorizontalRule, []), t("\ntext")])
    );
}

#[test]
fn horizontal_rule_failure_still_emits_node() {
    assert_eq!(
        parsed("---x"),
        root([el(Element::HorizontalRule, []), t("x")])
    );
}

#[test]
fn code_fence() {
    let pre = Node::with_children(Element::Pre, [t("fn main() {}")]).with_attribute("lang", "rust");
    assert_eq!(
        parsed("```rust\nfn main() {}\n```\nafter"),
        root([pre.into(), t("\nafter")])
    );
}

#[test]
fn code_fence_keeps_fence_with_info_in_body() {
    let pre = Node::with_children(Element::Pre, [t("```js"), t("\nx")]).with_attribute("lang", "md");
    assert_eq!(
        parsed("```md\n```js\nx\n```\nafter"),
        root([pre.into(), t("\nafter")])
    );
}

#[test]
fn link_with_empty_text() {
    let link = Node::new(Element::Link).with_attribute("href", "u");
    assert_eq!(parsed("[](u)"), root([link.into()]));
}

#[test]
fn deep_indent_is_text() {
    assert_eq!(parsed("          x"), root([t("          x")]));
    assert_eq!(parsed("         - x"), root([t("         - x")]));
}

#[test]
fn unicode_is_handled_per_character() {
    assert_eq!(
        parsed("é *ü*"),
        root([t("é "), el(Element::Em, [t("ü")])])
    );
}

#[test]
fn unterminated_constructs_stay_open() {
    let mut parser = Parser::default();
    parser.parse("**bold");
    assert_eq!(parser.depth(), 1);
    parser.finish();
    assert_eq!(parser.depth(), 1);
    assert_eq!(parser.root(), &root([el(Element::Strong, [t("bold")])]));
}

#[test]
fn finish_releases_pending_markers() {
    let mut parser = Parser::default();
    assert_eq!(parser.parse("x **"), &root([t("x ")]));
    assert_eq!(parser.finish(), &root([t("x **")]));
}

// Replay properties

#[rstest]
fn chunking_does_not_change_the_tree(
    #[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] case: usize,
    #[values(1, 2, 3, 7)] chunk: usize,
) {
    let input = CORPUS[case];
    let mut whole = Parser::default();
    whole.parse(input);

    let mut streamed = Parser::default();
    let chars: Vec<char> = input.chars().collect();
    for piece in chars.chunks(chunk) {
        streamed.parse(&piece.iter().collect::<String>());
    }

    assert_eq!(streamed.root(), whole.root());
    assert_eq!(streamed.pending(), whole.pending());
}

#[rstest]
fn reset_and_replay_matches_fresh_parse(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] case: usize) {
    let input = CORPUS[case];
    let mut parser = Parser::default();
    parser.parse("# stale **state");
    parser.clear_all_states();
    parser.parse(input);

    let mut fresh = Parser::default();
    assert_eq!(parser.root(), fresh.parse(input));
}

#[test]
fn every_prefix_yields_a_valid_tree() {
    let mut parser = Parser::default();
    for input in CORPUS {
        let boundaries = input.char_indices().map(|(i, _)| i).skip(1);
        for end in boundaries.chain([input.len()]) {
            parser.clear_all_states();
            invariants::check(parser.parse(&input[..end]));
        }
        parser.finish();
        invariants::check(parser.root());
    }
}

// Custom registries

/// Opens on `!!`, closes on `!!`, upper-cases its text once closed.
struct Shout(Emphasis);

impl Shout {
    fn new() -> Self {
        Self(Emphasis::new("shout", Element::Other("mark".into()), "!!", true))
    }
}

impl PatternHandler for Shout {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn element(&self) -> Element {
        self.0.element()
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        self.0.start(cx)
    }

    fn closing(&self, buffer: &str, node: &Node) -> Probe {
        self.0.closing(buffer, node)
    }

    fn feed(&self, ch: char, node: &mut Node, cx: &Context<'_>) -> bool {
        self.0.feed(ch, node, cx)
    }

    fn commit<'b>(&self, buffer: &'b str, node: &mut Node) -> &'b str {
        self.0.commit(buffer, node)
    }

    fn upgrade(&self, node: &mut Node, _cx: &Context<'_>) {
        for child in &mut node.children {
            if let Child::Text(text) = child {
                *text = text.to_uppercase();
            }
        }
    }

    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Forbidden
    }
}

#[test]
fn custom_handler_with_upgrade_hook() {
    let mut parser = Parser::new(HandlerRegistry::empty().with(Shout::new()));
    parser.parse("say !!hi!! now");
    assert_eq!(
        parser.root(),
        &root([
            t("say "),
            el(Element::Other("mark".into()), [t("HI")]),
            t(" now")
        ])
    );
}

#[test]
fn first_registered_commit_wins() {
    let first = || Emphasis::new("first", Element::Other("first".into()), "%%", true);
    let second = || Emphasis::new("second", Element::Other("second".into()), "%%", true);

    let mut parser = Parser::new(HandlerRegistry::empty().with(first()).with(second()));
    parser.parse("%%x%%");
    assert_eq!(
        parser.root().nodes().next().map(|n| n.element.as_str()),
        Some("first")
    );

    let mut parser = Parser::new(HandlerRegistry::empty().with(second()).with(first()));
    parser.parse("%%x%%");
    assert_eq!(
        parser.root().nodes().next().map(|n| n.element.as_str()),
        Some("second")
    );
}

#[test]
fn disabled_handler_falls_back_to_text() {
    let registry = HandlerRegistry::default().without(&["bold-asterisk"]);
    let mut parser = Parser::new(registry);
    parser.parse("**x**");
    parser.finish();
    assert!(parser.root().nodes().all(|n| n.element != Element::Strong));
    assert_eq!(parser.root().text().replace('*', ""), "x");
}

#[test]
fn triple_marker_at_line_start_is_a_rule() {
    // The rule commits on its third marker before bold+italic can.
    assert_eq!(
        parsed("***both***").nodes().next().map(|n| n.element.clone()),
        Some(Element::HorizontalRule)
    );
}
