use once_cell::sync::Lazy;
use regex::Regex;

// fontmake logs one of these per file it writes
static SAVING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^INFO:fontmake\.font_project:Saving (.*?)\r?$").unwrap());

/// Paths fontmake reported writing, in the order it reported them.
pub fn extract_reported_paths(text: &str) -> Vec<String> {
    SAVING_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// The last reported path; multi-output builds end with the one worth showing.
pub fn primary_output(text: &str) -> Option<String> {
    extract_reported_paths(text).pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
INFO:fontmake.font_project:Building master UFOs and designspace from Glyphs source
INFO:fontmake.font_project:Saving master_ttf/MyFont-Regular.ttf
WARNING:fontmake.font_project:Saving is not what this line does
INFO:fontmake.font_project:Saving variable_ttf/MyFont-VF.ttf
done
";

    #[test]
    fn finds_all_saving_lines_in_order() {
        assert_eq!(
            extract_reported_paths(LOG),
            vec!["master_ttf/MyFont-Regular.ttf", "variable_ttf/MyFont-VF.ttf"]
        );
        assert_eq!(primary_output(LOG).as_deref(), Some("variable_ttf/MyFont-VF.ttf"));
    }

    #[test]
    fn pattern_must_start_the_line() {
        let text = "  INFO:fontmake.font_project:Saving indented.ttf\n";
        assert!(extract_reported_paths(text).is_empty());
        assert!(primary_output("").is_none());
    }

    #[test]
    fn paths_keep_spaces_and_drop_carriage_returns() {
        let text = "INFO:fontmake.font_project:Saving /tmp/My Font/A.otf\r\n";
        assert_eq!(extract_reported_paths(text), vec!["/tmp/My Font/A.otf"]);
    }
}
