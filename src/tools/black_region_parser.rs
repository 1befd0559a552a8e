use super::time_interval::TimeInterval;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]*\.?[0-9]+").expect("valid number regex"));

static NUMERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]+$").expect("valid numeral regex"));

#[derive(Debug, Error, PartialEq)]
pub enum BlackRegionParseError {
    #[error("malformed numeral {token:?} in line {line:?}")]
    MalformedNumeral { line: String, token: String },
    #[error("black region ends before it starts: {start} > {end}")]
    Inverted { start: f64, end: f64 },
}

/// 解析 blackdetect 的 `black_start` / `black_end` 交錯輸出
///
/// 格式（`-of default=nw=1`）：
/// ```text
/// TAG:lavfi.black_start=0
/// TAG:lavfi.black_end=2.5
/// ```
///
/// 結尾缺少配對的 `black_end`（影片在最後仍為黑畫面）時停止解析，
/// 回傳先前已完整配對的區間，不視為錯誤。
pub fn parse_black_regions(output: &str) -> Result<Vec<TimeInterval>, BlackRegionParseError> {
    let mut lines: Vec<&str> = output.lines().map(str::trim_end).collect();
    lines.dedup();

    let mut intervals = Vec::with_capacity(lines.len() / 2);
    let mut i = 0;

    while i < lines.len() {
        let Some(start) = extract_number(lines[i])? else {
            break;
        };

        let Some(end_line) = lines.get(i + 1).filter(|line| !line.is_empty()) else {
            break;
        };
        let Some(end) = extract_number(end_line)? else {
            break;
        };

        let interval = TimeInterval::new(start, end)
            .ok_or(BlackRegionParseError::Inverted { start, end })?;
        intervals.push(interval);
        i += 2;
    }

    Ok(intervals)
}

/// 取出一行中的數值
///
/// `key=value` 形式取 `=` 之後的內容；否則取第一個數字子字串。
/// 沒有數值時回傳 `Ok(None)`，有內容但不是合法數字時回傳錯誤。
fn extract_number(line: &str) -> Result<Option<f64>, BlackRegionParseError> {
    let token = match line.rsplit_once('=') {
        Some((_, value)) => value.trim(),
        None => NUMBER_REGEX.find(line).map_or("", |m| m.as_str()),
    };

    if token.is_empty() {
        return Ok(None);
    }

    let malformed = || BlackRegionParseError::MalformedNumeral {
        line: line.to_string(),
        token: token.to_string(),
    };

    if !NUMERAL_REGEX.is_match(token) {
        return Err(malformed());
    }

    token.parse::<f64>().map(Some).map_err(|_| malformed())
}
