// Display helpers shared by every surface that renders engine output.

use crate::career::Average;

/// Placeholder for a category that has no data.
pub const NO_DATA: &str = "-";

/// One decimal place, or `-` for no data.
pub fn format_average(avg: Average) -> String {
    match avg {
        Average::Value(v) => format!("{v:.1}"),
        Average::NoData => NO_DATA.to_string(),
    }
}

pub fn format_pi(pi: f64) -> String {
    format!("{pi:.1}")
}

/// A single box-score cell: the recorded value or `-` when untracked.
pub fn format_count(value: Option<u32>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}

/// `W-L`. Ties are not shown.
pub fn format_record(wins: usize, losses: usize) -> String {
    format!("{wins}-{losses}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_round_to_one_decimal() {
        assert_eq!(format_average(Average::Value(4.0)), "4.0");
        assert_eq!(format_average(Average::Value(2.0 / 3.0)), "0.7");
        assert_eq!(format_average(Average::Value(0.0)), "0.0");
    }

    #[test]
    fn no_data_renders_as_dash() {
        assert_eq!(format_average(Average::NoData), "-");
        assert_eq!(format_count(None), "-");
        assert_eq!(format_count(Some(0)), "0");
    }

    #[test]
    fn record_and_pi() {
        assert_eq!(format_record(7, 3), "7-3");
        assert_eq!(format_pi(63.5), "63.5");
        assert_eq!(format_pi(-2.26), "-2.3");
    }
}
