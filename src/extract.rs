//! Locate and parse the JSON payload inside a raw model completion.
//!
//! Providers wrap structured output inconsistently, so extraction tries
//! patterns from most to least specific and never parses on its own.

use serde_json::Value;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Isolate the candidate JSON substring of `raw`.
///
/// Order: a ```` ```json ```` block, any fenced block, the span from the
/// first `{` to the last `}`, then the trimmed text itself. Only empty
/// input fails.
pub fn extract_json(raw: &str) -> crate::error::Result<String>
{   if raw.trim().is_empty()
    {   return Err(crate::error::Error::Extraction(
          "completion text is empty".to_string()
        ));
    }

    if let Some(block) = json_fenced_block(raw)
    {   return Ok(block.to_string());
    }
    if let Some(block) = any_fenced_block(raw)
    {   return Ok(block.to_string());
    }
    if let Some(span) = brace_span(raw)
    {   return Ok(span.to_string());
    }
    Ok(raw.trim().to_string())
}

/// Parse an extracted candidate as top-level JSON
pub fn parse_json(candidate: &str) -> crate::error::Result<Value>
{   serde_json::from_str::<Value>(candidate.trim())
      .map_err(|e| crate::error::Error::JsonParse(e.to_string()))
}

/// Extract then parse
pub fn parse_ai_response(raw: &str) -> crate::error::Result<Value>
{   let candidate = extract_json(raw)?;
    parse_json(&candidate)
}

/// First block opened with ```` ```json ```` on a line of its own.
/// Inline mentions of the tag and tags such as ```` ```jsonc ```` are
/// skipped.
fn json_fenced_block(raw: &str) -> Option<&str>
{   let mut from = 0;
    while let Some(pos) = raw[from..].find(JSON_FENCE)
    {   let start = from + pos + JSON_FENCE.len();
        if let Some(body_start) = line_break_after(raw, start)
        {   let end = raw[body_start..].find(FENCE)?;
            return Some(strip_closing_break(
              &raw[body_start..body_start + end]
            ));
        }
        from = start;
    }
    None
}

/// First complete fenced block, skipping an info string if present
fn any_fenced_block(raw: &str) -> Option<&str>
{   let open = raw.find(FENCE)?;
    let after = open + FENCE.len();
    let close = raw[after..].find(FENCE)? + after;

    let inner = &raw[after..close];
    let body_start = match inner.find('\n')
    {   Some(nl) if is_info_string(&inner[..nl]) => after + nl + 1
      , _ => after
    };
    Some(strip_closing_break(&raw[body_start..close]))
}

/// Greedy outer-brace span
fn brace_span(raw: &str) -> Option<&str>
{   let first = raw.find('{')?;
    let last = raw.rfind('}')?;
    if first < last
    {   Some(&raw[first..=last])
    } else
    {   None
    }
}

fn is_info_string(line: &str) -> bool
{   let line = line.trim_end_matches('\r');
    line.chars().all(|c| {
      c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
    })
}

/// Start of the next line when only spaces or tabs sit between `at`
/// and the line break
fn line_break_after(raw: &str, at: usize) -> Option<usize>
{   let rest = raw[at..].trim_start_matches([' ', '\t']);
    let body = rest.strip_prefix("\r\n")
      .or_else(|| rest.strip_prefix('\n'))?;
    Some(raw.len() - body.len())
}

/// Drop the single line break that belongs to the closing fence
fn strip_closing_break(body: &str) -> &str
{   body.strip_suffix("\r\n")
      .or_else(|| body.strip_suffix('\n'))
      .unwrap_or(body)
}
