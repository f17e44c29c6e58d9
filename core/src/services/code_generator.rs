//! Numeric verification code generation

use rand::Rng;

use crate::domain::entities::verification_record::CODE_LENGTH;

/// Produces verification codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Fixed-length decimal codes with every digit drawn independently from 0-9
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}
