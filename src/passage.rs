use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static PASSAGE_DIR: Dir = include_dir!("src/passages");

/// Difficulty labels keyed to the embedded corpus files.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses the lowercase name stored in the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn passage_set(&self) -> PassageSet {
        PassageSet::new(self.to_string().to_lowercase())
    }

    /// Draws a passage of this difficulty uniformly at random.
    pub fn draw(&self) -> String {
        self.passage_set().random_passage()
    }
}

/// A pool of passages sharing a difficulty, loaded from the embedded
/// corpus files.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct PassageSet {
    pub name: String,
    pub size: u32,
    pub passages: Vec<String>,
}

impl PassageSet {
    pub fn new(file_name: String) -> Self {
        read_set_from_file(format!("{file_name}.json")).unwrap()
    }

    /// Draws one passage from the pool uniformly at random.
    pub fn random_passage(&self) -> String {
        let mut rng = rand::thread_rng();
        self.passages.choose(&mut rng).cloned().unwrap_or_default()
    }
}

fn read_set_from_file(file_name: String) -> Result<PassageSet, Box<dyn Error>> {
    let file = PASSAGE_DIR
        .get_file(file_name)
        .expect("Passage file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let set = from_str(file_as_str).expect("Unable to deserialize passage json");

    Ok(set)
}
