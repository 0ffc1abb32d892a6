use proptest::prelude::*;

use super::*;
use crate::model::RulesConfig;

fn rules() -> HeadingRules {
    HeadingRules::new().expect("default rules compile")
}

fn heading(line: usize, level: u8, text: &str) -> Heading {
    Heading {
        line,
        level,
        text: text.to_string(),
    }
}

fn body_of(rendered: &str) -> &str {
    rendered
        .split_once("---\n")
        .map(|(_, body)| body)
        .expect("rendered output carries the preamble")
}

#[test]
fn split_lines_handles_page_breaks_and_carriage_returns() {
    assert_eq!(
        split_lines("a\r\nb\rc\u{000C}d\n"),
        vec!["a", "b", "c", "d"]
    );
    assert!(split_lines("").is_empty());
}

#[test]
fn normalize_text_trims_lines_and_caps_blank_runs() {
    let raw = "  \n\nTitle   \n\n\n\n\nBody\t\n\n";
    assert_eq!(normalize_text(raw), "Title\n\n\nBody\n");
}

#[test]
fn normalize_text_is_total_on_empty_input() {
    assert_eq!(normalize_text(""), "\n");
    assert_eq!(normalize_text("\n\n\n"), "\n");
}

#[test]
fn normalize_text_trims_leading_indentation_of_document() {
    assert_eq!(normalize_text("   Indented\n  next"), "Indented\n  next\n");
}

#[test]
fn classify_headings_assigns_levels_from_numeric_segments() {
    let lines = vec!["1 Intro", "1.1 Background", "1.1.1 Detail", "1.1.1.1 Deep", "Body"];
    let headings = classify_headings(&lines, None, &rules());

    assert_eq!(
        headings,
        vec![
            heading(0, 2, "1 Intro"),
            heading(1, 3, "1.1 Background"),
            heading(2, 4, "1.1.1 Detail"),
            heading(3, 5, "1.1.1.1 Deep"),
        ]
    );
}

#[test]
fn classify_headings_matches_section_titles_case_insensitively() {
    let lines = vec!["2.1 Scope", "OBJECTIVE", "  Open Questions  ", "Objectives"];
    let headings = classify_headings(&lines, None, &rules());

    assert_eq!(
        headings,
        vec![
            heading(0, 3, "2.1 Scope"),
            heading(1, 2, "OBJECTIVE"),
            heading(2, 2, "Open Questions"),
        ]
    );
}

#[test]
fn classify_headings_skips_bullets_and_bare_numbers() {
    let lines = vec![
        "• Objective",
        "o Errors",
        "▪ 1 Intro",
        "- 2 Scope",
        "42",
        "3.14",
        "1.2.3.4.5 Too deep",
        "",
    ];
    assert!(classify_headings(&lines, None, &rules()).is_empty());
}

#[test]
fn classify_headings_ignores_lines_inside_toc_span() {
    let lines = vec!["Table of Contents", "1 Scope ..... 3", "", "1 Scope", "Errors"];
    let span = TocSpan { start: 0, end: 3 };
    let headings = classify_headings(&lines, Some(span), &rules());

    assert_eq!(headings, vec![heading(3, 2, "1 Scope"), heading(4, 2, "Errors")]);
}

#[test]
fn locate_toc_spans_label_and_leader_dot_entries() {
    let lines = vec![
        "Preface",
        "Table of Contents",
        "Scope .......... 3",
        "",
        "Terms and definitions .. 12",
        "Requirements ....  7  ",
        "1 Scope",
        "Table of contents",
    ];

    assert_eq!(
        locate_toc(&lines, &rules()),
        Some(TocSpan { start: 1, end: 6 })
    );
}

#[test]
fn locate_toc_runs_to_end_of_document() {
    let lines = vec!["sisällys", "Johdanto ..... 1", ""];
    assert_eq!(locate_toc(&lines, &rules()), Some(TocSpan { start: 0, end: 3 }));
}

#[test]
fn locate_toc_is_absent_without_label() {
    let lines = vec!["Contents", "Scope .......... 3"];
    assert_eq!(locate_toc(&lines, &rules()), None);
}

#[test]
fn slugify_strips_diacritics_and_punctuation() {
    assert_eq!(slugify("Café & Crème"), "cafe-and-creme");
    assert_eq!(slugify("2.1 Scope"), "2-1-scope");
    assert_eq!(slugify("  Rules & Validation (server-enforced) "), "rules-and-validation-server-enforced");
    assert_eq!(slugify("!!!"), "section");
    assert_eq!(slugify(""), "section");
}

#[test]
fn allocate_anchors_suffixes_repeated_slugs() {
    let headings = vec![
        heading(0, 2, "Errors"),
        heading(5, 2, "Errors"),
        heading(9, 2, "ERRORS"),
    ];
    let anchors = allocate_anchors(&headings);

    assert_eq!(anchors[&0], "errors");
    assert_eq!(anchors[&5], "errors-2");
    assert_eq!(anchors[&9], "errors-3");
}

#[test]
fn allocate_anchors_never_reissues_literal_suffix() {
    let headings = vec![
        heading(0, 2, "Errors 2"),
        heading(1, 2, "Errors"),
        heading(2, 2, "Errors"),
    ];
    let anchors = allocate_anchors(&headings);

    assert_eq!(anchors[&0], "errors-2");
    assert_eq!(anchors[&1], "errors");
    assert_eq!(anchors[&2], "errors-3");
}

#[test]
fn render_structured_anchors_headings_and_collapses_blanks() {
    let output = render(
        "1 Intro\nHello\n\n\n\nWorld\n",
        "doc",
        RenderFormat::Structured,
        &rules(),
    );

    assert_eq!(
        output,
        "# doc (extracted)\n\n\
         > Extracted via pdftotext; formatting may differ from the original.\n\n\
         ---\n\
         <a id=\"1-intro\"></a>\n\
         ## 1 Intro\n\
         Hello\n\n\n\
         World\n"
    );
}

#[test]
fn render_structured_replaces_toc_with_generated_listing() {
    let text = "\
Table of Contents
1 Scope .......... 3
1.1 Terms .......... 5

1 Scope
Body text
1.1 Terms
More text
Errors
";
    let output = render(text, "manual.pdf", RenderFormat::Structured, &rules());

    assert_eq!(
        body_of(&output),
        "\
<a id=\"table-of-contents\"></a>
## Table of Contents
- [1 Scope](#1-scope)
  - [1.1 Terms](#1-1-terms)
- [Errors](#errors)

<a id=\"1-scope\"></a>
## 1 Scope
Body text
<a id=\"1-1-terms\"></a>
### 1.1 Terms
More text
<a id=\"errors\"></a>
## Errors
"
    );
}

#[test]
fn render_structured_keeps_toc_label_anchor_unique() {
    let text = "Table of Contents\nObjective .. 1\n\nObjective\nTable of Contents\n";
    let output = render(text, "doc", RenderFormat::Structured, &rules());
    let body = body_of(&output);

    assert!(body.contains("<a id=\"table-of-contents\"></a>\n## Table of Contents\n- [Objective](#objective)\n\n"));
    assert!(body.contains("<a id=\"table-of-contents-2\"></a>\n## Table of Contents\n"));
    assert!(!body.contains("- [Table of Contents]"));
}

#[test]
fn render_structured_output_has_no_trailing_whitespace_or_long_blank_runs() {
    let text = "Intro   \n\n\n\n\n1 Scope\t\n \nTable of Contents\n\n\nScope ... 1\n\n\n\nObjective\n\n\n\n";
    let output = render(text, "doc", RenderFormat::Structured, &rules());

    assert!(output.ends_with('\n') && !output.ends_with("\n\n"));
    assert!(!output.contains("\n\n\n\n"));
    for line in output.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in {line:?}");
    }
}

#[test]
fn render_plain_is_normalization_only() {
    let text = "Table of Contents\n1 Scope ..... 3\n\n\n\n\nbody   \n";
    for name in ["a.pdf", "", "other"] {
        assert_eq!(render(text, name, RenderFormat::Plain, &rules()), normalize_text(text));
    }
}

#[test]
fn render_treats_error_marker_as_body_text() {
    let marker = "[ERROR] Could not extract text from broken.pdf: exit status 1\n";
    let output = render(marker, "broken.pdf", RenderFormat::Structured, &rules());
    assert!(output.ends_with(marker));
}

#[test]
fn render_accepts_its_own_structured_output() {
    let first = render(
        "Table of Contents\n1 Scope .. 2\n\n1 Scope\ntext\n",
        "doc",
        RenderFormat::Structured,
        &rules(),
    );
    let second = render(&first, "doc", RenderFormat::Structured, &rules());
    assert!(second.starts_with("# doc (extracted)\n"));
}

#[test]
fn rules_from_config_extends_and_replaces_tables() {
    let extended = HeadingRules::from_config(&RulesConfig {
        toc_labels: vec!["  Contents ".to_string()],
        section_titles: vec!["Glossary".to_string(), "   ".to_string()],
        replace_defaults: false,
    })
    .expect("rules compile");
    assert!(extended.is_toc_label("CONTENTS"));
    assert!(extended.is_toc_label("table of contents"));
    assert!(extended.is_section_title("glossary"));
    assert_eq!(extended.section_title_count(), rules().section_title_count() + 1);

    let replaced = HeadingRules::from_config(&RulesConfig {
        toc_labels: vec!["Inhalt".to_string()],
        section_titles: Vec::new(),
        replace_defaults: true,
    })
    .expect("rules compile");
    assert!(replaced.is_toc_label("inhalt"));
    assert!(!replaced.is_toc_label("table of contents"));
    assert_eq!(replaced.section_title_count(), 0);

    let lines = vec!["Inhalt", "Einleitung ..... 1", "Objective"];
    assert_eq!(locate_toc(&lines, &replaced), Some(TocSpan { start: 0, end: 2 }));
    assert_eq!(
        classify_headings(&lines, None, &replaced),
        vec![heading(0, 2, "Inhalt")]
    );
}

proptest! {
    #[test]
    fn normalize_text_is_idempotent(text in "[a-zA-Z0-9 .\t\r\n\u{000C}\u{00A0}é•-]{0,200}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
        prop_assert!(!once.contains("\n\n\n\n"));
    }

    #[test]
    fn allocate_anchors_are_unique(texts in prop::collection::vec("[a-c &2-]{0,6}", 0..40)) {
        let headings = texts
            .iter()
            .enumerate()
            .map(|(line, text)| heading(line, 2, text))
            .collect::<Vec<Heading>>();
        let anchors = allocate_anchors(&headings);

        let mut seen = std::collections::HashSet::new();
        for anchor in anchors.values() {
            prop_assert!(seen.insert(anchor.clone()), "duplicate anchor {}", anchor);
        }
        prop_assert_eq!(anchors.len(), headings.len());
    }

    #[test]
    fn locate_toc_span_stops_at_first_non_entry(
        lines in prop::collection::vec(
            prop_oneof![
                Just("Table of Contents".to_string()),
                Just(String::new()),
                "[A-Z][a-z]{1,6} \\.{2,5} [0-9]{1,2}",
                "[A-Za-z ]{1,10}",
            ],
            0..20,
        )
    ) {
        let refs = lines.iter().map(String::as_str).collect::<Vec<&str>>();
        let rules = rules();
        if let Some(span) = locate_toc(&refs, &rules) {
            prop_assert!(span.start < span.end && span.end <= refs.len());
            prop_assert!(rules.is_toc_label(refs[span.start]));
            prop_assert!(refs[..span.start].iter().all(|line| !rules.is_toc_label(line)));
            for line in &refs[span.start + 1..span.end] {
                prop_assert!(line.trim().is_empty() || rules.is_toc_entry(line));
            }
            if let Some(next) = refs.get(span.end) {
                prop_assert!(!next.trim().is_empty() && !rules.is_toc_entry(next));
            }
        } else {
            prop_assert!(refs.iter().all(|line| !rules.is_toc_label(line)));
        }
    }
}
