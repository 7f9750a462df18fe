//! Random person names and email addresses.
//!
//! The batch generator only sees the [`PersonNameSource`] and [`EmailSource`] traits, so
//! tests can swap in fixed or mocked sources. [`RandomPersonSource`] is the production
//! implementation; give it a seed to make a run reproducible.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Supplies raw (unsanitized) person names.
pub trait PersonNameSource {
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
}

/// Builds an email address for a person at one of the allowed mail providers.
pub trait EmailSource {
    /// `providers` is never empty.
    fn email(&mut self, first_name: &str, last_name: &str, providers: &[String]) -> String;
}

const FIRST_NAMES: &[&str] = &[
    "Amaya", "Aaron", "Bianca", "Chathura", "Dilini", "Dmitri", "Elena", "Farhan", "Gayan",
    "Hiruni", "Ishara", "Jasper", "Kavindi", "Liam", "Malith", "Nadeesha", "Oscar", "Pasan",
    "Priya", "Quinn", "Ruwan", "Sachini", "Tharindu", "Umesh", "Vihanga", "Wendy", "Xavier",
    "Yasodha", "Zara", "Mary Ann", "Jo", "Renée", "D'Arcy",
];

const LAST_NAMES: &[&str] = &[
    "Perera", "Fernando", "Silva", "Jayasinghe", "Wickramasinghe", "Bandara", "Dissanayake",
    "Gunawardena", "Herath", "Karunaratne", "Rajapaksa", "Senanayake", "Abernathy", "Baker",
    "Chen", "Dubois", "Evans", "Fischer", "Garcia", "Hughes", "Ivanova", "Johnson", "Kowalski",
    "Li", "Müller", "O'Brien", "Smith-Jones", "Van der Berg", "Ng",
];

/// Names and emails drawn from built-in pools with a [`StdRng`].
pub struct RandomPersonSource {
    rng: StdRng,
}

impl RandomPersonSource {
    /// Seeded source: the same seed yields the same sequence of names and emails.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is set, OS-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Pick one of `providers` uniformly.
    pub fn provider<'a>(&mut self, providers: &'a [String]) -> Option<&'a str> {
        providers.choose(&mut self.rng).map(String::as_str)
    }

    fn pick(&mut self, pool: &[&str]) -> String {
        pool.choose(&mut self.rng)
            .map(|name| name.to_string())
            .unwrap_or_default()
    }
}

impl PersonNameSource for RandomPersonSource {
    fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES)
    }

    fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES)
    }
}

impl EmailSource for RandomPersonSource {
    fn email(&mut self, first_name: &str, last_name: &str, providers: &[String]) -> String {
        let provider = self.provider(providers).unwrap_or_default();
        let first = local_part(first_name);
        let last = local_part(last_name);
        let number: u32 = self.rng.random_range(0..100);

        let local = match self.rng.random_range(0..4) {
            0 => format!("{}.{}", first, last),
            1 => format!("{}_{}", first, last),
            2 => format!("{}{}", first, number),
            _ => format!("{}.{}{}", first, last, number),
        };

        format!("{}@{}", local, provider)
    }
}

/// Keep only characters that are safe in an unquoted email local part.
fn local_part(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
