//! File name lookup in `Content-Disposition` headers.
//!
//! Servers quote the parameter inconsistently, so the lookup runs three strategies in
//! order and takes the first that yields a non-blank name:
//!
//! 1. the quoted form `param="value"`
//! 2. everything after the last `param=`, with surrounding quotes removed
//! 3. the extended form `param*=charset'lang'value` from RFC 5987
//!
//! The name is then reduced to its final path component so a header can never place
//! the download outside the target directory.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use percent_encoding::percent_decode_str;
use regex::Regex;

/// Parameter looked up when the caller doesn't name one
pub const DEFAULT_FILE_NAME_PARAM: &str = "filename";

static QUOTED_FILE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| quoted_pattern(DEFAULT_FILE_NAME_PARAM));

/// Extracts the file name carried by the `param` parameter of a `Content-Disposition`
/// header value.
///
/// Returns `None` when no strategy yields a usable name.
///
/// # Example
///
/// ```
/// use micro_client::body::file_name_from_disposition;
///
/// let header = r#"attachment; filename="report.pdf""#;
/// assert_eq!(file_name_from_disposition(header, "filename").as_deref(), Some("report.pdf"));
///
/// let header = "attachment; filename*=UTF-8''%E6%8A%A5%E5%91%8A.pdf";
/// assert_eq!(file_name_from_disposition(header, "filename").as_deref(), Some("报告.pdf"));
/// ```
pub fn file_name_from_disposition(header: &str, param: &str) -> Option<String> {
    quoted_value(header, param)
        .or_else(|| trailing_value(header, param))
        .or_else(|| extended_value(header, param))
        .and_then(|name| final_component(&name).map(str::to_owned))
}

fn quoted_pattern(param: &str) -> Option<Regex> {
    Regex::new(&format!(r#"{}="(.*?)""#, regex::escape(param))).ok()
}

fn quoted_value(header: &str, param: &str) -> Option<String> {
    let custom;
    let pattern = if param == DEFAULT_FILE_NAME_PARAM {
        QUOTED_FILE_NAME.as_ref()?
    } else {
        custom = quoted_pattern(param)?;
        &custom
    };
    let value = pattern.captures(header)?.get(1)?.as_str();
    not_blank(value)
}

fn trailing_value(header: &str, param: &str) -> Option<String> {
    let key = format!("{param}=");
    let start = header.rfind(&key)? + key.len();
    let value = header[start..].trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    not_blank(value)
}

fn extended_value(header: &str, param: &str) -> Option<String> {
    let key = format!("{param}*=");
    let start = header.find(&key)? + key.len();
    let value = header[start..].split(';').next()?.trim().trim_matches('"');

    let mut parts = value.splitn(3, '\'');
    let (label, _language, encoded) = (parts.next()?, parts.next()?, parts.next()?);
    let charset = Encoding::for_label(label.trim().as_bytes()).unwrap_or(UTF_8);

    let bytes: Cow<'_, [u8]> = percent_decode_str(encoded).into();
    let (decoded, _) = charset.decode_without_bom_handling(&bytes);
    not_blank(&decoded)
}

fn not_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Returns the last path component of `name`, rejecting `.` and `..`.
pub(crate) fn final_component(name: &str) -> Option<&str> {
    name.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|component| !component.is_empty() && *component != "." && *component != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(header: &str) -> Option<String> {
        file_name_from_disposition(header, DEFAULT_FILE_NAME_PARAM)
    }

    #[test]
    fn test_quoted() {
        assert_eq!(lookup(r#"attachment; filename="report.pdf""#).as_deref(), Some("report.pdf"));
        assert_eq!(lookup(r#"attachment; filename="a b.txt"; size=3"#).as_deref(), Some("a b.txt"));
    }

    #[test]
    fn test_default_pattern_cached() {
        let pattern = QUOTED_FILE_NAME.as_ref().unwrap();
        assert!(std::ptr::eq(pattern, QUOTED_FILE_NAME.as_ref().unwrap()));
        assert_eq!(quoted_value(r#"inline; filename="a.txt""#, DEFAULT_FILE_NAME_PARAM).as_deref(), Some("a.txt"));
        assert_eq!(quoted_value(r#"inline; file.name="b.txt""#, "file.name").as_deref(), Some("b.txt"));
        assert_eq!(quoted_value(r#"inline; fileXname="b.txt""#, "file.name"), None);
    }

    #[test]
    fn test_unquoted() {
        assert_eq!(lookup("attachment; filename=report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(lookup("attachment; filename= report.pdf ").as_deref(), Some("report.pdf"));
    }

    #[test]
    fn test_unquoted_takes_last_occurrence() {
        assert_eq!(lookup("attachment; filename=a.txt; filename=b.txt").as_deref(), Some("b.txt"));
    }

    #[test]
    fn test_extended() {
        assert_eq!(lookup("attachment; filename*=UTF-8''na%C3%AFve.txt").as_deref(), Some("naïve.txt"));
        assert_eq!(lookup("attachment; filename*=gbk'zh'%D6%D0.txt").as_deref(), Some("中.txt"));
        assert_eq!(lookup("attachment; filename*=unknown''plain.txt").as_deref(), Some("plain.txt"));
    }

    #[test]
    fn test_quoted_wins_over_extended() {
        let header = r#"attachment; filename="fallback.pdf"; filename*=UTF-8''real.pdf"#;
        assert_eq!(lookup(header).as_deref(), Some("fallback.pdf"));
    }

    #[test]
    fn test_custom_param() {
        let header = r#"form-data; name="upload"; filename="x.bin""#;
        assert_eq!(file_name_from_disposition(header, "name").as_deref(), Some("upload"));
        assert_eq!(file_name_from_disposition("inline; file.name=a.txt", "file.name").as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_missing() {
        assert_eq!(lookup("attachment"), None);
        assert_eq!(lookup(r#"attachment; filename="""#), None);
        assert_eq!(lookup("attachment; filename=  "), None);
    }

    #[test]
    fn test_path_components_removed() {
        assert_eq!(lookup(r#"attachment; filename="../../etc/passwd""#).as_deref(), Some("passwd"));
        assert_eq!(lookup(r#"attachment; filename="C:\temp\evil.exe""#).as_deref(), Some("evil.exe"));
        assert_eq!(lookup(r#"attachment; filename="..""#), None);
        assert_eq!(lookup(r#"attachment; filename="dir/""#), None);
    }
}
