//! Music-lover profiles shown on discovery cards.

use super::Candidate;
use crate::error::{Result, TuneSwipeError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub age: u8,
    pub location: String,
    /// Human-readable distance, e.g. "3 km"
    pub distance: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub favorite_artists: Vec<String>,
}

impl Candidate for Profile {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Profile {
    pub fn headline(&self) -> String {
        format!("{}, {}", self.name, self.age)
    }
}

/// Loads a deck from a JSON array of profiles.
///
/// The file must contain at least one profile and ids must be unique.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        TuneSwipeError::ProfileError(format!(
            "Failed to read profiles from {}: {}",
            path.display(),
            e
        ))
    })?;

    let profiles: Vec<Profile> = serde_json::from_str(&contents).map_err(|e| {
        TuneSwipeError::ProfileError(format!(
            "Failed to parse profiles from {}: {}",
            path.display(),
            e
        ))
    })?;

    if profiles.is_empty() {
        return Err(TuneSwipeError::ProfileError(format!(
            "No profiles in {}",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for profile in &profiles {
        if !seen.insert(profile.id) {
            return Err(TuneSwipeError::ProfileError(format!(
                "Duplicate profile id {} in {}",
                profile.id,
                path.display()
            )));
        }
    }

    Ok(profiles)
}

#[allow(clippy::too_many_arguments)]
fn profile(
    id: u64,
    name: &str,
    age: u8,
    location: &str,
    distance: &str,
    bio: &str,
    genres: &[&str],
    artists: &[&str],
) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        age,
        location: location.to_string(),
        distance: distance.to_string(),
        bio: bio.to_string(),
        favorite_genres: genres.iter().map(|g| g.to_string()).collect(),
        favorite_artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

/// Built-in deck used when no profile file is given.
pub fn mock_profiles() -> Vec<Profile> {
    vec![
        profile(
            2,
            "Sophie",
            26,
            "Paris",
            "3 km",
            "Vinyl collector and weekend DJ. Always hunting for the next great B-side.",
            &["House", "Disco", "Funk"],
            &["Daft Punk", "Nile Rodgers", "Jamiroquai"],
        ),
        profile(
            3,
            "Lucas",
            29,
            "Lyon",
            "12 km",
            "Drummer in a garage band. Festivals every summer, jazz clubs every winter.",
            &["Rock", "Jazz", "Blues"],
            &["The Black Keys", "Miles Davis", "Arctic Monkeys"],
        ),
        profile(
            4,
            "Emma",
            24,
            "Paris",
            "5 km",
            "Classically trained pianist with a soft spot for synth-pop.",
            &["Classical", "Synth-pop", "Indie"],
            &["Chopin", "CHVRCHES", "Phoenix"],
        ),
        profile(
            5,
            "Hugo",
            31,
            "Bordeaux",
            "20 km",
            "Sound engineer. I'll judge your playlist, but kindly.",
            &["Electronic", "Ambient", "Techno"],
            &["Aphex Twin", "Bonobo", "Jon Hopkins"],
        ),
        profile(
            6,
            "Chloé",
            27,
            "Marseille",
            "8 km",
            "Sings in a choir, dances to anything with a bassline.",
            &["Soul", "R&B", "Hip-Hop"],
            &["Erykah Badu", "Anderson .Paak", "SZA"],
        ),
        profile(
            7,
            "Nathan",
            25,
            "Nantes",
            "15 km",
            "Guitar teacher by day, open-mic regular by night.",
            &["Folk", "Indie", "Rock"],
            &["Bon Iver", "Fleet Foxes", "The Strokes"],
        ),
        profile(
            8,
            "Léa",
            28,
            "Paris",
            "2 km",
            "Concert photographer. Front row or nothing.",
            &["Indie", "Alternative", "Electronic"],
            &["Tame Impala", "Radiohead", "Justice"],
        ),
    ]
}
