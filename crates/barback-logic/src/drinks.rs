//! Drink orders — categories, ice classes, and the fixed round catalog.
//!
//! Every round serves the same seven orders. Category-specific attributes
//! (ideal dilution, ice surface) are optional fields on a uniform [`Drink`],
//! with defaults applied where they are used.

use serde::{Deserialize, Serialize};

/// Physical handling class of a drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Stirred or shaken below freezing, served without ice.
    StraightUp,
    /// Served over ice — held near freezing but slowly diluted.
    OnTheRocks,
    /// Not chilled in the glass; warms toward room temperature.
    NonChilled,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 3] = [
        Category::StraightUp,
        Category::OnTheRocks,
        Category::NonChilled,
    ];

    /// Stable wire name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::StraightUp => "STRAIGHT_UP",
            Self::OnTheRocks => "ON_THE_ROCKS",
            Self::NonChilled => "NON_CHILLED",
        }
    }

    /// Parse a wire name back into a category.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::StraightUp => "Straight up",
            Self::OnTheRocks => "On the rocks",
            Self::NonChilled => "Non-chilled",
        }
    }
}

/// Ice surface-area class. More surface means faster melt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IceSurface {
    /// Single large cube or sphere.
    Large,
    #[default]
    Standard,
    Crushed,
}

impl IceSurface {
    pub const ALL: [IceSurface; 3] = [
        IceSurface::Large,
        IceSurface::Standard,
        IceSurface::Crushed,
    ];

    /// Dilution accrued per second of waiting (fraction of volume).
    pub fn dilution_rate(self) -> f64 {
        match self {
            Self::Large => 0.004,
            Self::Standard => 0.0055,
            Self::Crushed => 0.008,
        }
    }
}

/// A single order in the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Seconds needed to finish the drink once started.
    pub finish_seconds: f64,
    /// Temperature in Celsius when the order is placed.
    pub start_temp: f64,
    /// Target dilution fraction (on-the-rocks only; defaults to 0.33).
    pub ideal_dilution: Option<f64>,
    /// Ice class (on-the-rocks only; defaults to [`IceSurface::Standard`]).
    pub ice_surface: Option<IceSurface>,
}

impl Drink {
    fn straight_up(id: &str, name: &str, finish_seconds: f64, start_temp: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::StraightUp,
            finish_seconds,
            start_temp,
            ideal_dilution: None,
            ice_surface: None,
        }
    }

    fn on_the_rocks(
        id: &str,
        name: &str,
        finish_seconds: f64,
        start_temp: f64,
        ideal_dilution: f64,
        ice_surface: IceSurface,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::OnTheRocks,
            finish_seconds,
            start_temp,
            ideal_dilution: Some(ideal_dilution),
            ice_surface: Some(ice_surface),
        }
    }

    fn non_chilled(id: &str, name: &str, finish_seconds: f64, start_temp: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::NonChilled,
            finish_seconds,
            start_temp,
            ideal_dilution: None,
            ice_surface: None,
        }
    }
}

/// The fixed round catalog: two straight-up, three on-the-rocks (one per
/// ice class) and two non-chilled drinks.
///
/// Not randomized; every call returns the same list in the same order.
pub fn generate_orders() -> Vec<Drink> {
    vec![
        Drink::straight_up("martini", "Dry Martini", 14.0, -9.0),
        Drink::straight_up("daiquiri", "Daiquiri", 12.0, -8.0),
        Drink::on_the_rocks(
            "old-fashioned",
            "Old Fashioned",
            15.0,
            -1.0,
            0.16,
            IceSurface::Large,
        ),
        Drink::on_the_rocks("negroni", "Negroni", 12.0, -1.0, 0.08, IceSurface::Standard),
        Drink::on_the_rocks(
            "julep",
            "Mint Julep",
            14.0,
            -2.0,
            0.20,
            IceSurface::Crushed,
        ),
        Drink::non_chilled("lager", "Draft Lager", 8.0, 4.0),
        Drink::non_chilled("white-wine", "Glass of White Wine", 6.0, 9.0),
    ]
}

/// Look up a catalog drink by id.
pub fn find_drink(id: &str) -> Option<Drink> {
    generate_orders().into_iter().find(|d| d.id == id)
}
