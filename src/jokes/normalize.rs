//! Per-source decoding and extraction routines.
//!
//! None of the upstream sources share a wire format, so each strategy here is
//! deliberate string surgery. The HTML ones scrape ad hoc markup with plain
//! marker searches; a real HTML parser would not make those pages any less
//! brittle.

use encoding_rs::WINDOWS_1251;

use super::error::FetchError;

/// Content types accepted from the JSON joke APIs. The charset variants
/// mirror what these endpoints have been observed to declare in the wild;
/// do not narrow the list.
const ACCEPTED_JSON_CONTENT_TYPES: &[&str] = &[
    "application/json",
    "application/json; charset=utf-8",
    "application/json; charset=UTF-8",
    "application/json; charset=windows-1251",
    "application/json; charset=cp1251",
    "application/json; charset=us-ascii",
    "application/json; charset=iso-8859-1",
    "application/json; charset=ISO-8859-1",
];

pub fn is_json_content_type(content_type: &str) -> bool {
    ACCEPTED_JSON_CONTENT_TYPES.contains(&content_type)
}

/// Transcode a windows-1251 JSON payload to UTF-8 and make it parseable:
/// strip a BOM, trim surrounding whitespace, and turn raw CRLF pairs inside
/// the payload into the two-character `\n` escape so the document stays
/// valid JSON.
pub fn decode_legacy_json(provider: &'static str, raw: &[u8]) -> Result<String, FetchError> {
    let (decoded, _, had_errors) = WINDOWS_1251.decode(raw);
    if had_errors {
        return Err(FetchError::decoding(
            provider,
            "response is not valid windows-1251",
        ));
    }
    let trimmed = decoded.trim_start_matches('\u{feff}').trim();
    Ok(trimmed.replace("\r\n", "\\n"))
}

/// Undo newline markers left over after the JSON layer has been peeled off
/// a legacy payload, and trim the result.
pub fn restore_newlines(s: &str) -> String {
    s.replace("\\n", "\n").trim().to_string()
}

const ARRAY_OPEN: &str = "JSON.parse('[";
const ARRAY_CLOSE: &str = "]')";
// Entries inside the script literal are separated by a literal \",\" .
const ENTRY_DELIMITER: &str = "\\\",\\\"";
const ENTRY_QUOTE: &str = "\\\"";

/// Locate the `JSON.parse('[...]')` literal embedded in the page and split
/// it into raw entries. The surrounding escaped quotes belong to the literal,
/// not to the first/last entry, and are stripped before splitting.
pub fn extract_embedded_array<'a>(
    provider: &'static str,
    html: &'a str,
) -> Result<Vec<&'a str>, FetchError> {
    let start = html
        .find(ARRAY_OPEN)
        .ok_or_else(|| FetchError::extraction(provider, "embedded joke array not found"))?
        + ARRAY_OPEN.len();
    let end = html[start..]
        .find(ARRAY_CLOSE)
        .ok_or_else(|| FetchError::extraction(provider, "embedded joke array is not terminated"))?;

    let mut inner = &html[start..start + end];
    inner = inner.strip_prefix(ENTRY_QUOTE).unwrap_or(inner);
    inner = inner.strip_suffix(ENTRY_QUOTE).unwrap_or(inner);

    let entries: Vec<&str> = inner.split(ENTRY_DELIMITER).collect();
    if entries.is_empty() {
        return Err(FetchError::extraction(provider, "embedded joke array is empty"));
    }
    Ok(entries)
}

/// Unescape one entry of the embedded array, in the order the markup layers
/// were applied: JS quote escapes, `<br>` line breaks, then HTML entities.
pub fn unescape_array_entry(entry: &str) -> String {
    let unescaped = entry.replace("\\\"", "\"").replace("<br>", "\n");
    html_escape::decode_html_entities(&unescaped).trim().to_string()
}

const META_OPEN: &str = "<meta name=\"description\" content=\"";
const META_CLOSE: &str = "\">";

/// Pull the joke out of the page's `<meta name="description">` tag and
/// resolve its embedded newline and quote escapes.
pub fn extract_meta_description(
    provider: &'static str,
    html: &str,
) -> Result<String, FetchError> {
    let start = html
        .find(META_OPEN)
        .ok_or_else(|| FetchError::extraction(provider, "meta description not found"))?
        + META_OPEN.len();
    let end = html[start..]
        .find(META_CLOSE)
        .ok_or_else(|| FetchError::extraction(provider, "meta description is not terminated"))?;

    let text = html[start..start + end]
        .replace("\\n", "\n")
        .replace("\\\"", "\"");
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_types_accepted() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/json; charset=windows-1251"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type(""));
        assert!(!is_json_content_type("application/json; charset=koi8-r"));
    }

    #[test]
    fn legacy_json_round_trips_crlf() {
        let source = "{\"content\":\"Колобок\r\nповесился.\"}";
        let (raw, _, _) = WINDOWS_1251.encode(source);

        let payload = decode_legacy_json("test", &raw).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        let content = value["content"].as_str().unwrap();
        let text = restore_newlines(content);

        assert_eq!(text, "Колобок\nповесился.");
        assert!(!text.contains("\\n"));
    }

    #[test]
    fn legacy_json_strips_bom_and_whitespace() {
        let mut raw = vec![0xEF, 0xBB, 0xBF];
        raw.extend_from_slice(b"  {\"content\":\"ok\"}  ");
        let payload = decode_legacy_json("test", &raw).unwrap();
        assert_eq!(payload, "{\"content\":\"ok\"}");
    }

    #[test]
    fn embedded_array_yields_clean_entries() {
        let html = r#"<script>var x = JSON.parse('[\"a\",\"b\",\"c\"]');</script>"#;
        let entries = extract_embedded_array("test", html).unwrap();
        assert_eq!(entries, vec!["a", "b", "c"]);
    }

    #[test]
    fn embedded_array_requires_both_markers() {
        let err = extract_embedded_array("test", "<html>nothing here</html>").unwrap_err();
        assert!(matches!(err, FetchError::Extraction { .. }));

        let err = extract_embedded_array("test", "JSON.parse('[\\\"a\\\"").unwrap_err();
        assert!(matches!(err, FetchError::Extraction { .. }));
    }

    #[test]
    fn array_entry_unescaping_order() {
        let entry = "Он сказал: \\\"привет\\\"<br>&lt;и ушёл&gt; &amp; всё ";
        assert_eq!(
            unescape_array_entry(entry),
            "Он сказал: \"привет\"\n<и ушёл> & всё"
        );
    }

    #[test]
    fn meta_description_extracted_and_trimmed() {
        let html = "<head><meta name=\"description\" content=\" Шутка\\nдня \"></head>";
        assert_eq!(extract_meta_description("test", html).unwrap(), "Шутка\nдня");
    }

    #[test]
    fn meta_description_missing_is_extraction_failure() {
        let err = extract_meta_description("test", "<head></head>").unwrap_err();
        assert!(matches!(err, FetchError::Extraction { .. }));

        let err =
            extract_meta_description("test", "<meta name=\"description\" content=\"open").unwrap_err();
        assert!(matches!(err, FetchError::Extraction { .. }));
    }
}
