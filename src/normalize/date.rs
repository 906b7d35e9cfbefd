use chrono::NaiveDateTime;

type DateParser = fn(&str) -> Option<NaiveDateTime>;

/// Formats tried, in order, by [`parse_date`].
///
/// Month/day is attempted before day/month, so an ambiguous value such as `03/04/2021 10:00`
/// always resolves to March 4th. Keep this order stable, existing imports depend on it.
const DATE_PARSERS: [DateParser; 3] = [
    parse_iso_timestamp,
    parse_month_first_timestamp,
    parse_day_first_timestamp
];

/// Returns the first successful interpretation of `value`, or `None` when no format matches.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATE_PARSERS.iter().find_map(|parser| parser(value))
}

fn parse_iso_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok()
}

fn parse_month_first_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%m/%d/%Y %H:%M").ok()
}

fn parse_day_first_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%d/%m/%Y %H:%M").ok()
}
