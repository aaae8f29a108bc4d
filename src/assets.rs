//! Asset registry and preloading
//!
//! Every image and sound the game uses is a variant of a fixed enum. Loading
//! is fire-and-forget: each attempt resolves as either `Loaded` or `Failed`,
//! and the game starts once every attempt has resolved. A failed image just
//! means the renderer draws placeholder shapes; a failed sound falls back to
//! a synthesized cue.

use crate::renderer::AssetView;

/// Images, in load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageAsset {
    Background,
    Astronaut,
    TilePurple,
    TileRed,
    TileYellow,
    Coin,
    Wallpaper,
    PlayButton,
    ExitButton,
    TopScorer,
    Background2,
    Space2,
    Space3,
}

impl ImageAsset {
    pub const ALL: [ImageAsset; 13] = [
        ImageAsset::Background,
        ImageAsset::Astronaut,
        ImageAsset::TilePurple,
        ImageAsset::TileRed,
        ImageAsset::TileYellow,
        ImageAsset::Coin,
        ImageAsset::Wallpaper,
        ImageAsset::PlayButton,
        ImageAsset::ExitButton,
        ImageAsset::TopScorer,
        ImageAsset::Background2,
        ImageAsset::Space2,
        ImageAsset::Space3,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ImageAsset::Background => "bg.png",
            ImageAsset::Astronaut => "astronaut.png",
            ImageAsset::TilePurple => "tilePurple.png",
            ImageAsset::TileRed => "tileRed.png",
            ImageAsset::TileYellow => "tileYellow.png",
            ImageAsset::Coin => "coin.png",
            ImageAsset::Wallpaper => "Wallpaper.png",
            ImageAsset::PlayButton => "play.png",
            ImageAsset::ExitButton => "exit.png",
            ImageAsset::TopScorer => "topscorer.png",
            ImageAsset::Background2 => "bg2.png",
            ImageAsset::Space2 => "space2.png",
            ImageAsset::Space3 => "space3.png",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Sounds, in load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundAsset {
    Jump,
    Coins,
}

impl SoundAsset {
    pub const ALL: [SoundAsset; 2] = [SoundAsset::Jump, SoundAsset::Coins];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundAsset::Jump => "jump.wav",
            SoundAsset::Coins => "coins.mp3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Load state of one registry entry
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    /// Images carry their natural size
    Loaded { width: f32, height: f32 },
    /// Gave up; draw or play a fallback instead
    Failed,
}

impl AssetStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AssetStatus::Pending)
    }
}

/// Tracks how many load attempts have resolved
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    images: [AssetStatus; ImageAsset::ALL.len()],
    sounds: [AssetStatus; SoundAsset::ALL.len()],
    resolved: usize,
    ready_fired: bool,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.images.len() + self.sounds.len()
    }

    pub fn resolved(&self) -> usize {
        self.resolved
    }

    pub fn is_complete(&self) -> bool {
        self.resolved == self.total()
    }

    pub fn image_status(&self, asset: ImageAsset) -> AssetStatus {
        self.images[asset.index()]
    }

    pub fn sound_status(&self, asset: SoundAsset) -> AssetStatus {
        self.sounds[asset.index()]
    }

    /// Record an image load attempt; `size` is `None` on failure.
    ///
    /// Returns true exactly once: on the call that resolves the last pending
    /// asset.
    pub fn resolve_image(&mut self, asset: ImageAsset, size: Option<(f32, f32)>) -> bool {
        let status = match size {
            Some((width, height)) => AssetStatus::Loaded { width, height },
            None => {
                log::warn!("Failed to load image asset: {}", asset.file_name());
                AssetStatus::Failed
            }
        };
        let slot = &mut self.images[asset.index()];
        if slot.is_resolved() {
            return false;
        }
        *slot = status;
        self.mark_resolved()
    }

    /// Record a sound load attempt. Same contract as [`Self::resolve_image`].
    pub fn resolve_sound(&mut self, asset: SoundAsset, loaded: bool) -> bool {
        let status = if loaded {
            AssetStatus::Loaded {
                width: 0.0,
                height: 0.0,
            }
        } else {
            log::warn!("Failed to load sound asset: {}", asset.file_name());
            AssetStatus::Failed
        };
        let slot = &mut self.sounds[asset.index()];
        if slot.is_resolved() {
            return false;
        }
        *slot = status;
        self.mark_resolved()
    }

    fn mark_resolved(&mut self) -> bool {
        self.resolved += 1;
        if self.is_complete() && !self.ready_fired {
            self.ready_fired = true;
            let failed = self
                .images
                .iter()
                .chain(self.sounds.iter())
                .filter(|s| matches!(s, AssetStatus::Failed))
                .count();
            if failed == 0 {
                log::info!("Assets loaded, starting game");
            } else {
                log::info!("Game starting ({} assets failed)", failed);
            }
            true
        } else {
            false
        }
    }
}

impl AssetView for AssetTracker {
    fn image_size(&self, asset: ImageAsset) -> Option<(f32, f32)> {
        match self.image_status(asset) {
            AssetStatus::Loaded { width, height } if width > 0.0 && height > 0.0 => {
                Some((width, height))
            }
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{AssetStore, load_all};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlAudioElement, HtmlImageElement};

    use super::{AssetTracker, ImageAsset, SoundAsset};
    use crate::renderer::AssetView;

    type ReadyCallback = Box<dyn FnOnce()>;

    /// Loaded DOM elements plus their load status
    pub struct AssetStore {
        pub tracker: AssetTracker,
        images: HashMap<ImageAsset, HtmlImageElement>,
        sounds: HashMap<SoundAsset, HtmlAudioElement>,
    }

    impl AssetStore {
        fn new() -> Self {
            Self {
                tracker: AssetTracker::new(),
                images: HashMap::new(),
                sounds: HashMap::new(),
            }
        }

        /// A drawable image (loaded and complete)
        pub fn image(&self, asset: ImageAsset) -> Option<&HtmlImageElement> {
            self.tracker.image_size(asset)?;
            self.images.get(&asset).filter(|img| img.complete())
        }

        /// A playable sound
        pub fn sound(&self, asset: SoundAsset) -> Option<&HtmlAudioElement> {
            if self.tracker.sound_status(asset).is_resolved()
                && !matches!(self.tracker.sound_status(asset), super::AssetStatus::Failed)
            {
                self.sounds.get(&asset)
            } else {
                None
            }
        }
    }

    impl AssetView for AssetStore {
        fn image_size(&self, asset: ImageAsset) -> Option<(f32, f32)> {
            self.image(asset)?;
            self.tracker.image_size(asset)
        }
    }

    /// Resolve one attempt and fire the ready callback when it was the last one
    fn finish(
        store: &Rc<RefCell<AssetStore>>,
        ready: &Rc<RefCell<Option<ReadyCallback>>>,
        resolve: impl FnOnce(&mut AssetTracker) -> bool,
    ) {
        let all_done = resolve(&mut store.borrow_mut().tracker);
        if all_done {
            if let Some(callback) = ready.borrow_mut().take() {
                callback();
            }
        }
    }

    /// Start loading every asset from `base_path`. `on_ready` runs once all
    /// attempts resolved, successful or not.
    pub fn load_all(base_path: &str, on_ready: impl FnOnce() + 'static) -> Rc<RefCell<AssetStore>> {
        let store = Rc::new(RefCell::new(AssetStore::new()));
        let ready: Rc<RefCell<Option<ReadyCallback>>> =
            Rc::new(RefCell::new(Some(Box::new(on_ready))));

        for asset in ImageAsset::ALL {
            let Ok(img) = HtmlImageElement::new() else {
                finish(&store, &ready, |t| t.resolve_image(asset, None));
                continue;
            };

            let onload = {
                let (store, ready, img) = (store.clone(), ready.clone(), img.clone());
                Closure::<dyn FnMut()>::new(move || {
                    let size = (img.natural_width() as f32, img.natural_height() as f32);
                    finish(&store, &ready, |t| t.resolve_image(asset, Some(size)));
                })
            };
            let onerror = {
                let (store, ready) = (store.clone(), ready.clone());
                Closure::<dyn FnMut()>::new(move || {
                    finish(&store, &ready, |t| t.resolve_image(asset, None));
                })
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onload.forget();
            onerror.forget();

            store.borrow_mut().images.insert(asset, img.clone());
            img.set_src(&format!("{}/{}", base_path, asset.file_name()));
        }

        for asset in SoundAsset::ALL {
            let Ok(audio) = HtmlAudioElement::new() else {
                finish(&store, &ready, |t| t.resolve_sound(asset, false));
                continue;
            };

            let onready = {
                let (store, ready) = (store.clone(), ready.clone());
                Closure::<dyn FnMut()>::new(move || {
                    finish(&store, &ready, |t| t.resolve_sound(asset, true));
                })
            };
            let onerror = {
                let (store, ready) = (store.clone(), ready.clone());
                Closure::<dyn FnMut()>::new(move || {
                    finish(&store, &ready, |t| t.resolve_sound(asset, false));
                })
            };
            audio.set_oncanplaythrough(Some(onready.as_ref().unchecked_ref()));
            audio.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onready.forget();
            onerror.forget();

            audio.set_preload("auto");
            store.borrow_mut().sounds.insert(asset, audio.clone());
            audio.set_src(&format!("{}/{}", base_path, asset.file_name()));
        }

        store
    }
}
