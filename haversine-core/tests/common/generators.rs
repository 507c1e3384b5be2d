//! Stochastic document generators for parser tests
//!
//! Uses seeded RNG for reproducibility. Failures print the seed; replay
//! with `HAVERSINE_TEST_SEED=<seed>`.

use haversine_core::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("HAVERSINE_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Insignificant whitespace between tokens (usually empty)
    pub fn whitespace(&mut self) -> String {
        let count = self.geometric(0.3);
        let chars = [' ', '\t', '\n'];
        (0..count).map(|_| chars[self.rng.gen_range(0..chars.len())]).collect()
    }

    /// Random key: a letter followed by letters and digits
    pub fn key(&mut self) -> String {
        let len = self.geometric(0.7);
        let chars = b"abcdefghijklmnopqrstuvwxyz0123456789_";
        let mut key = String::with_capacity(len + 1);
        key.push(self.rng.gen_range(b'a'..=b'z') as char);
        for _ in 0..len {
            key.push(chars[self.rng.gen_range(0..chars.len())] as char);
        }
        key
    }

    /// Random quoted-string payload. Never starts with whitespace (the
    /// scanner drops it) and never contains a quote.
    pub fn text(&mut self) -> String {
        let mut text = self.key();
        if self.chance(0.3) {
            text.push_str(" and ");
            text.push_str(&self.key());
        }
        text
    }

    /// Random number literal in `-?digits(.digits)?` form
    pub fn number(&mut self) -> (String, f64) {
        let mut text = String::new();
        if self.chance(0.5) {
            text.push('-');
        }
        text.push_str(&self.rng.gen_range(0u32..100_000).to_string());
        if self.chance(0.7) {
            text.push('.');
            let digits = 1 + self.geometric(0.8);
            for _ in 0..digits {
                text.push(self.rng.gen_range(b'0'..=b'9') as char);
            }
        }
        let value = text.parse().expect("generated number literal");
        (text, value)
    }

    /// Random scalar as (document text, expected value)
    pub fn scalar(&mut self) -> (String, Value) {
        match self.rng.gen_range(0..5) {
            0 => {
                let text = self.text();
                (format!("\"{text}\""), Value::from(text))
            }
            1 => ("true".to_string(), Value::Bool(true)),
            2 => ("false".to_string(), Value::Bool(false)),
            3 => ("null".to_string(), Value::Null),
            _ => {
                let (text, value) = self.number();
                (text, Value::Number(value))
            }
        }
    }

    /// Random value, nesting at most `depth` more containers
    pub fn value(&mut self, depth: usize) -> (String, Value) {
        if depth == 0 || self.chance(0.6) {
            return self.scalar();
        }
        if self.chance(0.5) {
            self.object(depth - 1)
        } else {
            self.array(depth - 1)
        }
    }

    /// Random object with unique keys
    pub fn object(&mut self, depth: usize) -> (String, Value) {
        let count = self.geometric(0.75);
        let mut text = String::from("{");
        let mut expected = Value::object();
        for i in 0..count {
            if i > 0 {
                text.push(',');
            }
            let key = format!("{}{}", self.key(), i);
            let (value_text, value) = self.value(depth);
            text.push_str(&self.whitespace());
            text.push_str(&format!("\"{key}\""));
            text.push_str(&self.whitespace());
            text.push(':');
            text.push_str(&self.whitespace());
            text.push_str(&value_text);
            text.push_str(&self.whitespace());
            *expected.field_mut(&key).expect("object") = value;
        }
        text.push_str(&self.whitespace());
        text.push('}');
        (text, expected)
    }

    /// Random array
    pub fn array(&mut self, depth: usize) -> (String, Value) {
        let count = self.geometric(0.75);
        let mut text = String::from("[");
        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            if i > 0 {
                text.push(',');
            }
            let (value_text, value) = self.value(depth);
            text.push_str(&self.whitespace());
            text.push_str(&value_text);
            text.push_str(&self.whitespace());
            items.push(value);
        }
        text.push(']');
        (text, Value::Array(items))
    }

    /// Random top-level document
    pub fn document(&mut self, depth: usize) -> (String, Value) {
        if self.chance(0.5) {
            self.object(depth)
        } else {
            self.array(depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.key(), g2.key());
            assert_eq!(g1.document(3).0, g2.document(3).0);
        }
    }
}
