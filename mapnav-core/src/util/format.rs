use itertools::Itertools;
use uom::si::f64::{Length, Time};
use uom::si::length::kilometer;
use uom::si::time::second;

/// formats a distance in kilometers with one decimal, e.g. "12.3 km".
pub fn format_distance(distance: Length) -> String {
    format!("{:.1} km", distance.get::<kilometer>())
}

/// formats a travel time abbreviated to hours and minutes, e.g. "18 min" or "1 hr 5 min".
/// durations are rounded to the nearest minute.
pub fn format_travel_time(travel_time: Time) -> String {
    let total_minutes = (travel_time.get::<second>().max(0.0) / 60.0).round() as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let hours_part = (hours > 0).then(|| format!("{hours} hr"));
    let minutes_part = (minutes > 0 || hours == 0).then(|| format!("{minutes} min"));
    [hours_part, minutes_part].into_iter().flatten().join(" ")
}
