//! Cities and the per-run city registry.
//!
//! A [`CityRegistry`] owns every city of one optimization run in input
//! order. Tours refer to cities by their position in the registry, so the
//! registry index is the identity handle used by the engine, while
//! [`CityId`] is the identity shown to people.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, TourForgeError};

/// Externally visible identity of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityId(pub u64);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the plane that must be visited.
///
/// # Examples
///
/// ```
/// use tourforge_core::{City, CityId};
///
/// let a = City::new(CityId(1), 0.0, 0.0);
/// let b = City::new(CityId(2), 3.0, 4.0);
/// assert_eq!(a.distance_to(&b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    id: CityId,
    x: f64,
    y: f64,
}

impl City {
    /// Creates a city with an externally supplied id.
    pub const fn new(id: CityId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    #[inline]
    pub const fn id(&self) -> CityId {
        self.id
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another city.
    #[inline]
    pub fn distance_to(&self, other: &City) -> f64 {
        crate::distance::distance(self, other)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City {} ({}, {})", self.id, self.x, self.y)
    }
}

/// Owns the cities of a single run and hands out their ids.
///
/// Ids come from a counter owned by the registry (starting at 1), or are
/// supplied by the caller through [`CityRegistry::insert`]. Either way they
/// must be unique within the registry.
///
/// # Examples
///
/// ```
/// use tourforge_core::{CityId, CityRegistry};
///
/// let mut registry = CityRegistry::new();
/// let first = registry.add(0.0, 0.0);
/// let second = registry.add(5.0, 1.0);
///
/// assert_eq!(first, CityId(1));
/// assert_eq!(second, CityId(2));
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: Vec<City>,
    ids: HashSet<CityId>,
    next_id: u64,
}

impl CityRegistry {
    /// Creates an empty registry whose first generated id is 1.
    pub fn new() -> Self {
        Self {
            cities: Vec::new(),
            ids: HashSet::new(),
            next_id: 1,
        }
    }

    /// Builds a registry from coordinates, numbering cities 1, 2, 3, ...
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut registry = Self::new();
        for (x, y) in points {
            registry.add(x, y);
        }
        registry
    }

    /// Builds a registry from cities carrying their own ids.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if two cities share an id.
    pub fn from_cities<I>(cities: I) -> Result<Self>
    where
        I: IntoIterator<Item = City>,
    {
        let mut registry = Self::new();
        for city in cities {
            registry.insert(city)?;
        }
        Ok(registry)
    }

    /// Registers a city at `(x, y)` with the next free id.
    pub fn add(&mut self, x: f64, y: f64) -> CityId {
        while self.ids.contains(&CityId(self.next_id)) {
            self.next_id += 1;
        }
        let id = CityId(self.next_id);
        self.next_id += 1;
        self.ids.insert(id);
        self.cities.push(City::new(id, x, y));
        id
    }

    /// Registers a city with an externally supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if the id is 0 or already taken.
    pub fn insert(&mut self, city: City) -> Result<()> {
        if city.id().0 == 0 {
            return Err(TourForgeError::invalid_input("city ids start at 1"));
        }
        if !self.ids.insert(city.id()) {
            return Err(TourForgeError::invalid_input(format!(
                "duplicate city id {}",
                city.id()
            )));
        }
        self.cities.push(city);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns the city at registry index `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// Returns all cities in input order.
    #[inline]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Finds the registry index of the city with the given id.
    pub fn index_of(&self, id: CityId) -> Option<usize> {
        self.cities.iter().position(|c| c.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, City> {
        self.cities.iter()
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for CityRegistry {
    type Output = City;

    fn index(&self, index: usize) -> &City {
        &self.cities[index]
    }
}

impl<'a> IntoIterator for &'a CityRegistry {
    type Item = &'a City;
    type IntoIter = std::slice::Iter<'a, City>;

    fn into_iter(self) -> Self::IntoIter {
        self.cities.iter()
    }
}
