#[macro_export]
macro_rules! t {
    (now) => {{
        $crate::core::time::DateTime::now()
    }};

    ($year:literal - $month:literal - $day:literal , $hour:literal : $minute:literal) => {{
        $crate::core::time::Date::ymd($year, $month, $day)
            .unwrap()
            .start_of_day()
            + $crate::core::time::Duration::hours($hour)
            + $crate::core::time::Duration::minutes($minute)
    }};

    ($year:literal - $month:literal - $day:literal) => {{
        $crate::core::time::Date::ymd($year, $month, $day).unwrap()
    }};

    ($amount:literal days) => {{
        $crate::core::time::Duration::days($amount)
    }};
    ($amount:literal hours) => {{
        $crate::core::time::Duration::hours($amount)
    }};

    ($amount:literal days ago) => {{
        $crate::t!(now) - $crate::t!($amount days)
    }};
}
