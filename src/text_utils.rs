use chrono::{Local, NaiveDate};

/// "March 1, 2024"
pub fn format_long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "2024-03-01", the value of an HTML date input.
pub fn format_input_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_input_date(buf: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(buf.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Unable to parse date {}", buf))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Splits a comma separated input, dropping blanks. "a, b,,c " gives [a, b, c].
pub fn split_list(input: &str) -> Vec<String> {
    input.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_long_date(&date), "March 1, 2024");
        assert_eq!(format_input_date(&date), "2024-03-01");
        assert_eq!(parse_input_date(" 2024-03-01"), Ok(date));
        assert_eq!(parse_input_date("01/03/2024"), Err("Unable to parse date 01/03/2024".to_string()));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("React, Web Development ,, Tutorial,"), ["React", "Web Development", "Tutorial"]);
        assert!(split_list(" , ").is_empty());
        assert_eq!(join_list(&split_list("a,b")), "a, b");
    }
}
