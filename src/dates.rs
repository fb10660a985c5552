//! Serde helpers for dates written as `YYYY-MM-DD`.

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");
