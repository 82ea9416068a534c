use time::{Date, Month, Weekday};

pub fn weekday_abbrev(w: Weekday) -> &'static str {
    match w {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

pub fn weekday_full(w: Weekday) -> &'static str {
    match w {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

pub fn month_abbrev(m: Month) -> &'static str {
    match m {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// First day of the month `n` calendar months before `date`'s month.
pub fn month_start_back(date: Date, n: u32) -> anyhow::Result<Date> {
    let mut year = date.year();
    let mut month = date.month() as i32 - n as i32;
    while month <= 0 {
        month += 12;
        year -= 1;
    }
    let month = Month::try_from(month as u8)?;
    Ok(Date::from_calendar_date(year, month, 1)?)
}

/// First day of the month following `date`'s month.
pub fn next_month_start(date: Date) -> anyhow::Result<Date> {
    let (year, month) = if date.month() == Month::December {
        (date.year() + 1, Month::January)
    } else {
        (date.year(), date.month().next())
    };
    Ok(Date::from_calendar_date(year, month, 1)?)
}

/// "instagram" -> "Instagram"; mirrors how platform slices are labelled.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn month_walk_crosses_year_boundary() {
        let d = date!(2026 - 02 - 17);
        assert_eq!(month_start_back(d, 0).unwrap(), date!(2026 - 02 - 01));
        assert_eq!(month_start_back(d, 1).unwrap(), date!(2026 - 01 - 01));
        assert_eq!(month_start_back(d, 2).unwrap(), date!(2025 - 12 - 01));
        assert_eq!(month_start_back(d, 5).unwrap(), date!(2025 - 09 - 01));
        assert_eq!(month_start_back(d, 14).unwrap(), date!(2024 - 12 - 01));
    }

    #[test]
    fn next_month_handles_december() {
        assert_eq!(
            next_month_start(date!(2025 - 12 - 31)).unwrap(),
            date!(2026 - 01 - 01)
        );
        assert_eq!(
            next_month_start(date!(2026 - 06 - 15)).unwrap(),
            date!(2026 - 07 - 01)
        );
    }

    #[test]
    fn labels() {
        assert_eq!(weekday_abbrev(Weekday::Wednesday), "Wed");
        assert_eq!(weekday_full(Weekday::Sunday), "Sunday");
        assert_eq!(month_abbrev(Month::September), "Sep");
    }

    #[test]
    fn title_case_platforms() {
        assert_eq!(title_case("instagram"), "Instagram");
        assert_eq!(title_case("x"), "X");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn rounding_to_one_decimal() {
        assert_eq!(round1(1.0 / 3.0 * 10.0), 3.3);
        assert_eq!(round1(2.0), 2.0);
    }
}
