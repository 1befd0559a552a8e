/// 閉區間 `[start, end]`，以秒為單位，代表需要跳過的黑畫面區段
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    start: f64,
    end: f64,
}

impl TimeInterval {
    /// 建立區間；`start > end` 或含 NaN 時回傳 `None`
    #[must_use]
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// 兩端皆包含
    #[must_use]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

/// 找出第一個包含 `time` 的區間
///
/// 依序掃描，不假設已排序；重疊或亂序時以清單中最先出現者為準。
#[must_use]
pub fn find_black_interval(time: f64, intervals: &[TimeInterval]) -> Option<&TimeInterval> {
    intervals.iter().find(|interval| interval.contains(time))
}
