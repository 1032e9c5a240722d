//! OAuth scope handling for the Fortnox API.
//!
//! This module provides the [`Scope`] enum of known Fortnox consent scopes
//! and the [`ScopeSet`] collection used when requesting access tokens and
//! when comparing requested against granted permissions.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A Fortnox consent scope.
///
/// Scopes are granted during client consent in the Fortnox Developer Portal
/// and must be requested by name when obtaining an access token. The wire
/// format is the lowercase scope name; sets are space-joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// Document archive access.
    Archive,
    /// Article register access.
    Article,
    /// Asset register access.
    Assets,
    /// Bookkeeping (vouchers, accounts) access.
    Bookkeeping,
    /// Company information access.
    CompanyInformation,
    /// Cost center access.
    CostCenter,
    /// Currency table access.
    Currency,
    /// Customer register access.
    Customer,
    /// Invoice access.
    Invoice,
    /// Offer access.
    Offer,
    /// Order access.
    Order,
    /// Price list access.
    Price,
    /// Print/send document access.
    Print,
    /// Project access.
    Project,
    /// Salary access.
    Salary,
    /// Settings access.
    Settings,
    /// Supplier register access.
    Supplier,
    /// Supplier invoice access.
    SupplierInvoice,
}

impl Scope {
    /// Returns the scope name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Article => "article",
            Self::Assets => "assets",
            Self::Bookkeeping => "bookkeeping",
            Self::CompanyInformation => "companyinformation",
            Self::CostCenter => "costcenter",
            Self::Currency => "currency",
            Self::Customer => "customer",
            Self::Invoice => "invoice",
            Self::Offer => "offer",
            Self::Order => "order",
            Self::Price => "price",
            Self::Print => "print",
            Self::Project => "project",
            Self::Salary => "salary",
            Self::Settings => "settings",
            Self::Supplier => "supplier",
            Self::SupplierInvoice => "supplierinvoice",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archive" => Ok(Self::Archive),
            "article" => Ok(Self::Article),
            "assets" => Ok(Self::Assets),
            "bookkeeping" => Ok(Self::Bookkeeping),
            "companyinformation" => Ok(Self::CompanyInformation),
            "costcenter" => Ok(Self::CostCenter),
            "currency" => Ok(Self::Currency),
            "customer" => Ok(Self::Customer),
            "invoice" => Ok(Self::Invoice),
            "offer" => Ok(Self::Offer),
            "order" => Ok(Self::Order),
            "price" => Ok(Self::Price),
            "print" => Ok(Self::Print),
            "project" => Ok(Self::Project),
            "salary" => Ok(Self::Salary),
            "settings" => Ok(Self::Settings),
            "supplier" => Ok(Self::Supplier),
            "supplierinvoice" => Ok(Self::SupplierInvoice),
            other => Err(ConfigError::UnknownScope {
                scope: other.to_string(),
            }),
        }
    }
}

/// An ordered set of Fortnox consent scopes.
///
/// # Wire Format
///
/// Fortnox expects scope sets space-joined in the token request body and
/// returns granted scopes the same way in the token response. Parsing also
/// accepts comma separators for convenience.
///
/// # Example
///
/// ```rust
/// use fortnox_api::{Scope, ScopeSet};
///
/// let requested: ScopeSet = "invoice customer".parse().unwrap();
/// let granted: ScopeSet = "invoice".parse().unwrap();
///
/// let missing = requested.missing_from(&granted);
/// assert_eq!(missing, vec![Scope::Customer]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ScopeSet {
    scopes: BTreeSet<Scope>,
}

impl ScopeSet {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of scopes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if the set contains `scope`.
    #[must_use]
    pub fn contains(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Adds a scope to the set.
    pub fn insert(&mut self, scope: Scope) {
        self.scopes.insert(scope);
    }

    /// Returns the scopes in this set that are absent from `granted`.
    ///
    /// Used by the connectivity test to warn about scopes that were
    /// requested but not granted during client consent.
    #[must_use]
    pub fn missing_from(&self, granted: &Self) -> Vec<Scope> {
        self.scopes
            .iter()
            .filter(|s| !granted.scopes.contains(s))
            .copied()
            .collect()
    }

    /// Returns an iterator over the scopes in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = Scope> + '_ {
        self.scopes.iter().copied()
    }

    /// Returns the space-joined wire representation.
    #[must_use]
    pub fn to_scope_string(&self) -> String {
        let names: Vec<&str> = self.scopes.iter().map(Scope::as_str).collect();
        names.join(" ")
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self {
            scopes: iter.into_iter().collect(),
        }
    }
}

impl FromStr for ScopeSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = BTreeSet::new();

        for name in s.split(|c: char| c == ' ' || c == ',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            scopes.insert(name.parse()?);
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_scope_string())
    }
}

impl Serialize for ScopeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_scope_string())
    }
}

impl<'de> Deserialize<'de> for ScopeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
