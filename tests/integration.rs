use std::sync::atomic::AtomicBool;

use blog_cleaner::{
    BlogCleanerError, Cleaner, CleaningOptions, export_table, process_column,
    process_column_with_cancel,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A realistic blog body the way it comes out of an exported CMS dump:
/// heading, padding paragraphs, inline formatting, tracking leftovers.
const BLOG_BODY: &str = "<h2 class=\"post-title\">My Trip</h2>\n\
<p>&nbsp;</p>\n\
<p>We <strong>loved</strong> the <a href=\"/coast\">coast</a>.<br/>More soon.</p>\n\
<!-- draft note -->\n\
<img src=\"photo.jpg\" alt=\"view\">\n\
<p style=\"margin:0\">The&nbsp;end.</p>";

fn clean_with(text: &str, options: &CleaningOptions) -> String {
    Cleaner::new(options.clone()).clean(text)
}

fn clean_default(text: &str) -> String {
    clean_with(text, &CleaningOptions::default())
}

// ---------------------------------------------------------------------------
// End-to-end: single-value cleaning
// ---------------------------------------------------------------------------

#[test]
fn e2e_default_options_worked_example() {
    let out = clean_default("<h2>Title</h2><p>&nbsp;</p><p>Hello <strong>world</strong></p>");
    assert_eq!(out, "<p>Hello world</p>");
}

#[test]
fn e2e_script_blocks_removed_keeping_safe_text() {
    let out = clean_default("<script>alert(1)</script><p>Safe text</p>");
    assert_eq!(out, "<p>Safe text</p>");
}

#[test]
fn e2e_realistic_blog_body() {
    let out = clean_default(BLOG_BODY);
    assert_eq!(
        out,
        "<p>We loved the coast. More soon.</p>\n\n<p>The end.</p>"
    );
}

#[test]
fn e2e_block_rules_span_lines_and_ignore_case() {
    let input = "keep<STYLE media=\"all\">\nbody { margin: 0 }\n</STYLE>\
                 <PRE>\nverbatim\n</PRE>this";
    assert_eq!(clean_default(input), "keepthis");
}

#[test]
fn e2e_unbalanced_markup_passes_through() {
    assert_eq!(clean_default("<p>unbalanced"), "<p>unbalanced");
    assert_eq!(clean_default("stray</h2>close"), "stray</h2>close");
}

#[test]
fn e2e_remove_all_p_strips_every_paragraph() {
    let options = CleaningOptions {
        remove_all_p: true,
        ..CleaningOptions::default()
    };
    let out = clean_with("<p>one</p><p class=\"x\">two</p>", &options);
    assert_eq!(out, "one two");
}

#[test]
fn e2e_attribute_strip_applies_to_surviving_tags() {
    let options = CleaningOptions::from_flags([("remove_attributes", true)]);
    let out = clean_with("<h2 id=\"t\">kept</h2><img src=\"x\"/>", &options);
    assert_eq!(out, "<h2>kept</h2><img/>");
}

#[test]
fn e2e_disabled_pipeline_is_identity() {
    let text = "  <h2>Raw</h2>\n\n\n\n<p>&nbsp;</p>  ";
    assert_eq!(clean_with(text, &CleaningOptions::none()), text);
}

// ---------------------------------------------------------------------------
// Pipeline properties
// ---------------------------------------------------------------------------

#[test]
fn prop_cleaning_is_deterministic() {
    let cleaner = Cleaner::new(CleaningOptions::default());
    let first = cleaner.clean(BLOG_BODY);
    let second = cleaner.clean(BLOG_BODY);
    assert_eq!(first, second);
}

#[test]
fn prop_null_values_clean_to_empty() {
    for options in [
        CleaningOptions::default(),
        CleaningOptions::none(),
        CleaningOptions::all(),
    ] {
        assert_eq!(Cleaner::new(options).clean_value(None), "");
    }
}

#[test]
fn prop_remove_all_p_wins_over_remove_empty_p() {
    let both = CleaningOptions {
        remove_all_p: true,
        remove_empty_p: true,
        ..CleaningOptions::default()
    };
    let all_only = CleaningOptions {
        remove_all_p: true,
        remove_empty_p: false,
        ..CleaningOptions::default()
    };
    let input = "<p> </p><p>a</p><p>&nbsp;</p>";
    assert_eq!(clean_with(input, &both), clean_with(input, &all_only));
}

#[test]
fn prop_whitespace_normalization_is_idempotent() {
    let options = CleaningOptions::from_flags([("normalize_whitespace", true)]);
    let once = clean_with("  a\t\tb   \n\n\n\n\nc  ", &options);
    let twice = clean_with(&once, &options);
    assert_eq!(twice, once);
}

#[test]
fn prop_nested_same_tag_unwraps_one_level_per_pass() {
    let options = CleaningOptions::from_flags([("remove_spans", true)]);
    let out = clean_with("<span><span>deep</span></span>", &options);
    assert_eq!(out, "<span>deep</span>");
}

// ---------------------------------------------------------------------------
// Batch processing
// ---------------------------------------------------------------------------

#[test]
fn batch_preserves_order_and_cardinality_with_null_rows() {
    let column = vec![Some("<h2>a</h2>first"), None, Some("third")];
    let (results, summary) = process_column(&column, &CleaningOptions::default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].cleaned_text, "first");
    assert_eq!(results[1].cleaned_text, "");
    assert_eq!(results[2].cleaned_text, "third");
    assert_eq!(summary.rows_processed, 3);
}

#[test]
fn batch_summary_statistics() {
    let column = vec![Some("<h2>Hi</h2>ab"), None, Some("abcd")];
    let (results, summary) = process_column(&column, &CleaningOptions::default());

    assert_eq!(results[0].original_length, 13);
    assert_eq!(results[0].cleaned_length, 2);
    assert_eq!(results[1].original_length, 0);
    assert_eq!(summary.total_chars_removed, 11);

    // The null row contributes no term to the mean.
    let expected = (11.0 / 13.0 * 100.0) / 2.0;
    assert!((summary.average_reduction_percent - expected).abs() < 1e-9);
}

#[test]
fn batch_of_only_empty_rows_reports_zero_average() {
    let column: Vec<Option<&str>> = vec![Some(""), None, Some("")];
    let (results, summary) = process_column(&column, &CleaningOptions::default());

    assert_eq!(results.len(), 3);
    assert_eq!(summary.average_reduction_percent, 0.0);
    assert_eq!(summary.total_chars_removed, 0);
}

#[test]
fn batch_of_zero_rows() {
    let column: Vec<Option<&str>> = Vec::new();
    let (results, summary) = process_column(&column, &CleaningOptions::default());

    assert!(results.is_empty());
    assert_eq!(summary.rows_processed, 0);
    assert_eq!(summary.average_reduction_percent, 0.0);
}

#[test]
fn batch_cancel_flag_discards_partial_results() {
    let column = vec![Some("<p>a</p>"), Some("<p>b</p>")];
    let cancel = AtomicBool::new(true);

    let err = process_column_with_cancel(&column, &CleaningOptions::default(), &cancel)
        .unwrap_err();
    assert!(matches!(
        err,
        BlogCleanerError::Cancelled {
            rows_done: 0,
            rows_total: 2,
        }
    ));
}

#[test]
fn batch_without_cancellation_completes() {
    let column = vec![Some("<h2>x</h2>kept")];
    let cancel = AtomicBool::new(false);

    let (results, summary) =
        process_column_with_cancel(&column, &CleaningOptions::default(), &cancel).unwrap();
    assert_eq!(results[0].cleaned_text, "kept");
    assert_eq!(summary.rows_processed, 1);
}

#[cfg(feature = "parallel")]
#[test]
fn batch_parallel_matches_serial_output() {
    use blog_cleaner::process_column_parallel;

    let column: Vec<Option<String>> = (0..100)
        .map(|i| {
            if i % 7 == 0 {
                None
            } else {
                Some(format!("<h2>Post {i}</h2><p>Body <strong>{i}</strong></p>"))
            }
        })
        .collect();

    let options = CleaningOptions::default();
    let (serial_results, serial_summary) = process_column(&column, &options);
    let (parallel_results, parallel_summary) = process_column_parallel(&column, &options);

    assert_eq!(parallel_results, serial_results);
    assert_eq!(parallel_summary, serial_summary);
}

// ---------------------------------------------------------------------------
// Export table
// ---------------------------------------------------------------------------

#[test]
fn export_pairs_original_and_cleaned_columns() {
    let column = vec![Some("<h2>t</h2>body"), None];
    let (results, _) = process_column(&column, &CleaningOptions::default());
    let table = export_table(Some("content"), &column, &results);

    assert_eq!(table.headers, vec!["content", "cleaned_content"]);
    assert_eq!(table.rows[0], vec!["<h2>t</h2>body", "body"]);
    assert_eq!(table.rows[1], vec!["", ""]);
}

#[test]
fn export_serializes_for_the_download_collaborator() {
    let column = vec![Some("<p>a</p>")];
    let (results, _) = process_column(&column, &CleaningOptions::default());
    let table = export_table(None, &column, &results);

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["headers"][0], "cleaned_content");
    assert_eq!(json["rows"][0][0], "<p>a</p>");
}
