// Three single-branch decision functions: an age gate, an admin login check
// and a two-tier shipping price. Their `Display` output is the message shown
// to the user.

use std::fmt;

/// Minimum age that passes the gate.
pub const ADULT_AGE: u32 = 18;

pub const ADMIN_LOGIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password";

/// Heaviest parcel, in kilograms, that still ships at the light rate.
pub const LIGHT_PARCEL_MAX_WEIGHT: u32 = 10;
pub const LIGHT_PARCEL_COST: u32 = 200;
pub const HEAVY_PARCEL_COST: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCheck {
    Allowed,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCheck {
    Welcome,
    Restricted,
}

/// Delivery price in rubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingCost(pub u32);

pub fn check_age(age: u32) -> AgeCheck {
    if age >= ADULT_AGE {
        AgeCheck::Allowed
    } else {
        AgeCheck::Denied
    }
}

pub fn check_auth(login: &str, password: &str) -> AuthCheck {
    if login == ADMIN_LOGIN && password == ADMIN_PASSWORD {
        AuthCheck::Welcome
    } else {
        AuthCheck::Restricted
    }
}

pub fn get_cost(weight: u32) -> ShippingCost {
    if weight <= LIGHT_PARCEL_MAX_WEIGHT {
        ShippingCost(LIGHT_PARCEL_COST)
    } else {
        ShippingCost(HEAVY_PARCEL_COST)
    }
}

impl fmt::Display for AgeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeCheck::Allowed => f.write_str("Доступ разрешён"),
            AgeCheck::Denied => f.write_str("Доступ запрещён"),
        }
    }
}

impl fmt::Display for AuthCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthCheck::Welcome => f.write_str("Добро пожаловать"),
            AuthCheck::Restricted => f.write_str("Доступ ограничен"),
        }
    }
}

impl fmt::Display for ShippingCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Стоимость доставки: {} руб.", self.0)
    }
}
