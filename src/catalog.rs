use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed set of form choices whose labels are the exact strings
/// the price model was trained on.
macro_rules! choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice!(Airline {
    IndiGo => "IndiGo",
    AirIndia => "Air India",
    Vistara => "Vistara",
    SpiceJet => "SpiceJet",
    GoFirst => "GO FIRST",
    AirAsia => "AirAsia",
});

choice!(City {
    Delhi => "Delhi",
    Mumbai => "Mumbai",
    Bangalore => "Bangalore",
    Kolkata => "Kolkata",
    Hyderabad => "Hyderabad",
    Chennai => "Chennai",
});

choice!(
    /// Slice of the day used for departure and arrival slots.
    TimeBand {
        EarlyMorning => "Early_Morning",
        Morning => "Morning",
        Afternoon => "Afternoon",
        Evening => "Evening",
        Night => "Night",
        LateNight => "Late_Night",
    }
);

choice!(Stops {
    Zero => "zero",
    One => "one",
    TwoOrMore => "two_or_more",
});

choice!(Class {
    Economy => "Economy",
    Business => "Business",
});

impl Stops {
    pub fn code(self) -> i64 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::TwoOrMore => 2,
        }
    }
}

impl Class {
    pub fn code(self) -> i64 {
        match self {
            Self::Economy => 0,
            Self::Business => 1,
        }
    }
}

pub const DURATION_MIN: f64 = 0.5;
pub const DURATION_MAX: f64 = 60.0;
pub const DURATION_STEP: f64 = 0.5;
pub const DAYS_LEFT_MIN: i64 = 1;
pub const DAYS_LEFT_MAX: i64 = 60;
