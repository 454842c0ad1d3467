use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::error::GenError;

pub const NUM_DECIMAL_PLACES: u32 = 2;

/// The restaurant menu. Every item has a fixed, positive unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MenuItem {
    Burger,
    Pizza,
    Salad,
    Pasta,
    Sandwich,
    Drink,
    Dessert,
    Appetizer,
}

/// A positive amount of money with exactly [`NUM_DECIMAL_PLACES`] decimal places
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl MenuItem {
    /// The full catalog, in the order items are listed on the menu
    pub const ALL: [MenuItem; 8] = [
        MenuItem::Burger,
        MenuItem::Pizza,
        MenuItem::Salad,
        MenuItem::Pasta,
        MenuItem::Sandwich,
        MenuItem::Drink,
        MenuItem::Dessert,
        MenuItem::Appetizer,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MenuItem::Burger => "Burger",
            MenuItem::Pizza => "Pizza",
            MenuItem::Salad => "Salad",
            MenuItem::Pasta => "Pasta",
            MenuItem::Sandwich => "Sandwich",
            MenuItem::Drink => "Drink",
            MenuItem::Dessert => "Dessert",
            MenuItem::Appetizer => "Appetizer",
        }
    }

    #[must_use]
    pub fn price(self) -> Price {
        let cents = match self {
            MenuItem::Burger => 1099,
            MenuItem::Pizza => 1599,
            MenuItem::Salad => 899,
            MenuItem::Pasta => 1299,
            MenuItem::Sandwich => 999,
            MenuItem::Drink => 299,
            MenuItem::Dessert => 599,
            MenuItem::Appetizer => 799,
        };
        Price(Decimal::new(cents, NUM_DECIMAL_PLACES))
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MenuItem {
    type Err = GenError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        MenuItem::ALL
            .iter()
            .copied()
            .find(|item| item.name() == name)
            .ok_or_else(|| GenError::UnknownItem(name.to_owned()))
    }
}

/// Picks a menu item uniformly at random
impl Distribution<MenuItem> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MenuItem {
        MenuItem::ALL[rng.gen_range(0..MenuItem::ALL.len())]
    }
}

impl TryFrom<Decimal> for Price {
    type Error = GenError;
    fn try_from(decimal: Decimal) -> Result<Self, Self::Error> {
        let mut rounded = decimal.round_dp(NUM_DECIMAL_PLACES);
        if rounded > Decimal::ZERO {
            rounded.rescale(NUM_DECIMAL_PLACES);
            Ok(Price(rounded))
        } else {
            Err(GenError::InvalidPrice)
        }
    }
}

impl FromStr for Price {
    type Err = GenError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| GenError::InvalidPrice)?;
        Price::try_from(decimal)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Price {
    /// Sums the unit prices of every item in `items`.
    ///
    /// # Errors
    /// Errors when `items` is empty (the total would not be positive) or the sum overflows
    pub fn total(items: &[MenuItem]) -> Result<Price, GenError> {
        let sum = items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.price().0).ok_or(GenError::InvalidPrice)
        })?;
        Price::try_from(sum)
    }

    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}
