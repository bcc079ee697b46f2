//! 日期类型模块
//!
//! 后端以 `"YYYY-MM-DD"` 传输日历日期，空字符串表示未设置。
//! `JsonDate` 负责在两种表示之间转换。

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 可为空的日历日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JsonDate(Option<NaiveDate>);

impl JsonDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// 解析 `YYYY-MM-DD`，空白字符串视为未设置
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::empty());
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT).map(Self::new)
    }
}

impl From<NaiveDate> for JsonDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl fmt::Display for JsonDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl Serialize for JsonDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for JsonDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(Self::empty()),
            Some(s) => Self::parse(&s).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_null_decode_to_unset() {
        let empty: JsonDate = serde_json::from_str("\"\"").unwrap();
        let null: JsonDate = serde_json::from_str("null").unwrap();
        assert!(empty.is_empty());
        assert!(null.is_empty());
    }

    #[test]
    fn calendar_date_is_preserved() {
        let date: JsonDate = serde_json::from_str("\"2024-02-29\"").unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-02-29\"");
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(serde_json::from_str::<JsonDate>("\"29/02/2024\"").is_err());
    }
}
