use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Activity kinds with a built-in emission factor
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityType {
    Electricity,
    Gas,
    Water,
    Transport,
    Product,
    /// Anything else is counted one-to-one
    Other(String),
}

impl ActivityType {
    /// kg CO2e per unit of activity
    pub fn factor(&self) -> f64 {
        match self {
            ActivityType::Electricity => 0.4,
            ActivityType::Gas => 5.3,
            ActivityType::Water => 0.0003,
            ActivityType::Transport => 0.21,
            ActivityType::Product => 0.5,
            ActivityType::Other(_) => 1.0,
        }
    }

    /// Unit the factor is expressed per
    pub fn unit(&self) -> &str {
        match self {
            ActivityType::Electricity => "kWh",
            ActivityType::Gas => "therm",
            ActivityType::Water => "gallon",
            ActivityType::Transport => "km",
            ActivityType::Product => "kg",
            ActivityType::Other(_) => "unit",
        }
    }
}

impl FromStr for ActivityType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "electricity" => ActivityType::Electricity,
            "gas" => ActivityType::Gas,
            "water" => ActivityType::Water,
            "transport" => ActivityType::Transport,
            "product" => ActivityType::Product,
            _ => ActivityType::Other(s.trim().to_string()),
        })
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Electricity => write!(f, "electricity"),
            ActivityType::Gas => write!(f, "gas"),
            ActivityType::Water => write!(f, "water"),
            ActivityType::Transport => write!(f, "transport"),
            ActivityType::Product => write!(f, "product"),
            ActivityType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// kg CO2e for `amount` units of `activity`
pub fn calculate_co2e(activity: &ActivityType, amount: f64) -> f64 {
    amount * activity.factor()
}
