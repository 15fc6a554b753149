use std::sync::Arc;

use crate::{SeedValue, SourceImage};

/// Values that live for the whole session: the image and the seed.
#[derive(Debug, Clone)]
pub struct Session {
    pub image: Arc<SourceImage>,
    pub seed: SeedValue,
}

impl Session {
    pub fn new(image: SourceImage, seed: SeedValue) -> Self {
        tracing::info!(
            width = image.width(),
            height = image.height(),
            seed = seed.value(),
            polarity = ?seed.polarity(),
            "session initialised"
        );
        Self {
            image: Arc::new(image),
            seed,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.image.aspect()
    }
}
