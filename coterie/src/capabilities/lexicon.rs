/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use coterie_core::prelude::WordSource;
use rand::seq::IndexedRandom;

const DEFAULT_WORDS: [&str; 10] = [
    "hello", "sun", "world", "space", "moon", "crypto", "sky", "ocean", "universe", "human",
];

/// A [`WordSource`] drawing uniformly without replacement from a fixed list.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: Vec<String>,
}

impl Lexicon {
    /// Creates a lexicon over a custom word list.
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().map(|w| (*w).to_string()).collect())
    }
}

impl WordSource for Lexicon {
    fn random_words(&self, count: usize) -> Vec<String> {
        let mut rng = rand::rng();
        self.words
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_distinct_words_from_the_list() {
        let lexicon = Lexicon::default();
        let words = lexicon.random_words(2);
        assert_eq!(words.len(), 2);
        assert_ne!(words[0], words[1]);
        for word in &words {
            assert!(DEFAULT_WORDS.contains(&word.as_str()));
        }
    }

    #[test]
    fn asking_for_more_than_available_caps_at_the_list() {
        let lexicon = Lexicon::new(vec!["only".to_string()]);
        assert_eq!(lexicon.random_words(5), vec!["only".to_string()]);
    }
}
