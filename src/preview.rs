use crate::config::{OrderedListStyle, Settings};
use crate::list_state::ListState;
use crate::steps::{Step, steps};
use crate::token::{Inline, ListKind, Token};

/// Render tokens as normalized Markdown for display.
///
/// List items are flattened into prefixed lines according to `settings`;
/// the result is meant to be rendered as Markdown again by the caller.
pub fn render_preview(tokens: &[Token], settings: &Settings) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut lists = ListState::new();

    for step in steps(tokens) {
        match step {
            Step::EnterList { kind, start } => lists.enter(kind, start),
            Step::ExitList(kind) => lists.exit(kind),
            Step::Heading { level, inline } => {
                if let Some(inline) = inline {
                    lines.push(format!("{} {}", "#".repeat(level as usize), inline.content));
                }
                lines.push(String::new());
            }
            Step::Paragraph(inline) | Step::Loose(inline) => {
                lines.push(item_line(inline, &mut lists, settings));
            }
            Step::ParagraphEnd => {
                // List items are not separated by blank lines
                if lists.current().is_none() {
                    lines.push(String::new());
                }
            }
        }
    }

    lines.join("\n").trim().to_string()
}

fn item_line(inline: &Inline, lists: &mut ListState, settings: &Settings) -> String {
    let content = &inline.content;
    match lists.current() {
        Some(ListKind::Bullet) if !settings.ignore_bullets => format!("• {content}"),
        Some(ListKind::Ordered) => {
            let ordinal = lists.next_ordinal();
            match settings.ordered_list_style {
                OrderedListStyle::Text | OrderedListStyle::List => format!("{ordinal}. {content}"),
                OrderedListStyle::None => content.clone(),
            }
        }
        _ => content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{OrderedListStyle, Settings};
    use crate::markdown_to_preview;

    fn settings(ignore_bullets: bool, ordered_list_style: OrderedListStyle) -> Settings {
        Settings {
            ignore_bullets,
            ordered_list_style,
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(markdown_to_preview("", &Settings::default()), "");
    }

    #[test]
    fn heading_and_paragraph() {
        assert_eq!(
            markdown_to_preview("# Title\n\nSome **bold** text.", &Settings::default()),
            "# Title\n\nSome **bold** text."
        );
    }

    #[test]
    fn paragraphs_are_separated() {
        assert_eq!(
            markdown_to_preview("one\n\ntwo", &Settings::default()),
            "one\n\ntwo"
        );
    }

    #[test]
    fn bullets_ignored_by_default() {
        assert_eq!(
            markdown_to_preview("- one\n- two", &Settings::default()),
            "one\ntwo"
        );
    }

    #[test]
    fn bullets_kept() {
        assert_eq!(
            markdown_to_preview("- one\n- two", &settings(false, OrderedListStyle::Text)),
            "• one\n• two"
        );
    }

    #[test]
    fn ordered_text_and_list_number_items() {
        for style in [OrderedListStyle::Text, OrderedListStyle::List] {
            assert_eq!(
                markdown_to_preview("1. alpha\n2. beta", &settings(true, style)),
                "1. alpha\n2. beta"
            );
        }
    }

    #[test]
    fn ordered_start_is_honoured() {
        assert_eq!(
            markdown_to_preview("5. five\n6. six\n7. seven", &Settings::default()),
            "5. five\n6. six\n7. seven"
        );
    }

    #[test]
    fn ordered_none_drops_numbers() {
        assert_eq!(
            markdown_to_preview("1. alpha\n2. beta", &settings(true, OrderedListStyle::None)),
            "alpha\nbeta"
        );
    }

    #[test]
    fn nested_lists_count_independently() {
        let md = "1. one\n   1. inner\n   2. inner two\n2. two";
        assert_eq!(
            markdown_to_preview(md, &Settings::default()),
            "1. one\n1. inner\n2. inner two\n2. two"
        );
    }

    #[test]
    fn ignore_bullets_leaves_numbers_alone() {
        let md = "- bullet\n\n1. first";
        assert_eq!(
            markdown_to_preview(md, &settings(true, OrderedListStyle::Text)),
            "bullet\n1. first"
        );
    }

    #[test]
    fn line_break_inside_item_keeps_one_marker() {
        assert_eq!(
            markdown_to_preview("- item one\nmore text", &settings(false, OrderedListStyle::Text)),
            "• item one\nmore text"
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let md = "# H\n\n3. a\n4. b\n\n- c";
        let settings = settings(false, OrderedListStyle::Text);
        assert_eq!(
            markdown_to_preview(md, &settings),
            markdown_to_preview(md, &settings)
        );
    }

    #[test]
    fn images_stay_in_preview() {
        assert_eq!(
            markdown_to_preview("![logo](logo.png)", &Settings::default()),
            "![logo](logo.png)"
        );
    }
}
