use crate::domain::model::{BoldFragment, RawDocument};
use crate::utils::error::{BechdelError, Result};
use regex::Regex;
use std::path::Path;

const ENTITIES: [(&str, &str); 5] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Numeric character reference to a char.
///
/// Codes 128..=159 are read as Windows-1252, which is what most scraped
/// screenplay pages actually mean by `&#146;` and friends.
fn decode_numeric(code: u32) -> Option<char> {
    let mapped = match code {
        0x91 | 0x92 => '\'',
        0x93 | 0x94 => '"',
        0x96 | 0x97 => '-',
        0x85 => '…',
        0xA0 => ' ',
        0x80..=0x9F => return None,
        _ => return char::from_u32(code),
    };
    Some(mapped)
}

/// Turns an IMSDb-style HTML screenplay into bold fragments and body lines.
///
/// The body is the first `<pre>` block. Bold fragments are every `<b>`
/// element in the page, with their leading whitespace kept intact.
pub struct MarkupConverter {
    bold: Regex,
    pre: Regex,
    tag: Regex,
    numeric: Regex,
}

impl MarkupConverter {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| BechdelError::ProcessingError {
                message: format!("Invalid markup pattern {}: {}", pattern, e),
            })
        };
        Ok(Self {
            bold: compile(r"(?is)<b\b[^>]*>(.*?)</b\s*>")?,
            pre: compile(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>")?,
            tag: compile(r"(?s)<[^>]*>")?,
            numeric: compile(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));")?,
        })
    }

    fn text_of(&self, fragment: &str) -> String {
        let mut text = self.tag.replace_all(fragment, "").into_owned();
        for (entity, replacement) in ENTITIES {
            text = text.replace(entity, replacement);
        }
        let text = self.numeric.replace_all(&text, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (_, Some(dec)) => dec.as_str().parse().ok(),
                _ => None,
            };
            code.and_then(decode_numeric)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        });
        // &amp; 最後處理，避免 "&amp;lt;" 被解碼兩次
        text.replace("&amp;", "&")
    }

    pub fn bold_fragments(&self, html: &str) -> Vec<BoldFragment> {
        self.bold
            .captures_iter(html)
            .map(|caps| BoldFragment::new(self.text_of(&caps[1])))
            .collect()
    }

    pub fn convert(&self, id: &str, html: &str) -> Result<RawDocument> {
        let body = self
            .pre
            .captures(html)
            .ok_or_else(|| BechdelError::UnparsableDocument {
                id: id.to_string(),
                reason: "missing <pre> body block".to_string(),
            })?;

        let lines = self
            .text_of(&body[1])
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();

        let bold_fragments = self.bold_fragments(html);

        let title = bold_fragments
            .first()
            .map(|b| b.raw.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                Path::new(id)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(id)
                    .to_string()
            });

        Ok(RawDocument {
            title,
            bold_fragments,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = concat!(
        "<html><head><title>Script</title></head><body>\n",
        "<td class=\"scrtext\"><pre><b>                         THELMA &amp; LOUISE</b>\r\n",
        "\r\n",
        "<b>                    THELMA</b>\r\n",
        "          I&#39;ve never been out of town.\r\n",
        "\r\n",
        "<b>                    LOUISE</b>\r\n",
        "          Well, <i>now</i> you have.\r\n",
        "\r\n",
        "</pre></td></body></html>",
    );

    #[test]
    fn test_convert_extracts_body_and_bold() {
        let converter = MarkupConverter::new().unwrap();
        let doc = converter.convert("thelma.html", PAGE).unwrap();

        assert_eq!(doc.title, "THELMA & LOUISE");
        assert_eq!(doc.bold_fragments.len(), 3);
        assert_eq!(doc.bold_fragments[1].raw, "                    THELMA");
        assert_eq!(doc.bold_fragments[1].indent(), 20);
        assert_eq!(doc.lines[2], "                    THELMA");
        assert_eq!(doc.lines[3], "          I've never been out of town.");
        assert_eq!(doc.lines[6], "          Well, now you have.");
        assert!(doc.lines.iter().all(|l| !l.ends_with('\r')));
    }

    #[test]
    fn test_numeric_references_are_decoded() {
        let converter = MarkupConverter::new().unwrap();
        let page = concat!(
            "<pre><b>    DOROTHY</b>\n",
            "  You don&#146;t &#8220;get&#8221; it &#x2014; Jerry&#8217;s gone&#133;\n",
            "  &amp;lt; &#99999999; &#150;\n",
            "</pre>",
        );
        let doc = converter.convert("jerry.html", page).unwrap();

        assert_eq!(
            doc.lines[1],
            "  You don't \u{201c}get\u{201d} it \u{2014} Jerry\u{2019}s gone…"
        );
        assert_eq!(doc.lines[2], "  &lt; &#99999999; -");
    }

    #[test]
    fn test_missing_pre_is_unparsable() {
        let converter = MarkupConverter::new().unwrap();
        let err = converter
            .convert("index.html", "<html><b>MENU</b></html>")
            .unwrap_err();
        assert!(matches!(err, BechdelError::UnparsableDocument { .. }));
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let converter = MarkupConverter::new().unwrap();
        let doc = converter
            .convert("Plain-Script.html", "<pre>\nJUST TEXT\n</pre>")
            .unwrap();
        assert_eq!(doc.title, "Plain-Script");
        assert!(doc.bold_fragments.is_empty());
        assert_eq!(doc.lines, vec!["", "JUST TEXT", ""]);
    }
}
