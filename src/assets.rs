use crate::constants::VIDEO_READY_STATE;
use anyhow::anyhow;
use fnv::{FnvHashMap, FnvHashSet};
use wasm_bindgen::JsCast;
use web_sys as web;

enum Asset {
    Image(web::HtmlImageElement),
    Video(web::HtmlVideoElement),
}

/// Images and the detached looping clip, by logical key. Nothing here blocks:
/// an asset that is still loading simply reports not ready.
#[derive(Default)]
pub struct AssetStore {
    assets: FnvHashMap<String, Asset>,
    reported: FnvHashSet<String>,
}

impl AssetStore {
    pub fn load_image(&mut self, key: &str, src: &str) -> anyhow::Result<()> {
        let img = web::HtmlImageElement::new().map_err(|e| anyhow!("image {key}: {:?}", e))?;
        img.set_cross_origin(Some("anonymous"));
        img.set_src(src);
        self.assets.insert(key.to_string(), Asset::Image(img));
        Ok(())
    }

    /// A muted, looping video that is never attached to the DOM; frames are
    /// drawn onto the overlay canvas.
    pub fn load_video(
        &mut self,
        document: &web::Document,
        key: &str,
        src: &str,
    ) -> anyhow::Result<()> {
        let video = document
            .create_element("video")
            .map_err(|e| anyhow!("video {key}: {:?}", e))?
            .dyn_into::<web::HtmlVideoElement>()
            .map_err(|e| anyhow!("video {key}: {:?}", e))?;
        video.set_muted(true);
        video.set_loop(true);
        video.set_preload("auto");
        video.set_cross_origin(Some("anonymous"));
        _ = video.set_attribute("playsinline", "");
        video.set_src(src);
        self.assets.insert(key.to_string(), Asset::Video(video));
        Ok(())
    }

    pub fn is_ready(&self, key: &str) -> bool {
        match self.assets.get(key) {
            Some(Asset::Image(img)) => img.complete() && img.natural_width() > 0,
            Some(Asset::Video(v)) => v.ready_state() >= VIDEO_READY_STATE && v.video_width() > 0,
            None => false,
        }
    }

    pub fn aspect(&self, key: &str) -> Option<f32> {
        if !self.is_ready(key) {
            return None;
        }
        let (w, h) = match self.assets.get(key)? {
            Asset::Image(img) => (img.natural_width(), img.natural_height()),
            Asset::Video(v) => (v.video_width(), v.video_height()),
        };
        (h > 0).then(|| w as f32 / h as f32)
    }

    /// Assets that became ready since the last call, with their aspect.
    pub fn newly_ready(&mut self) -> Vec<(String, f32)> {
        let mut fresh = Vec::new();
        for key in self.assets.keys() {
            if self.reported.contains(key) {
                continue;
            }
            if let Some(aspect) = self.aspect(key) {
                fresh.push((key.clone(), aspect));
            }
        }
        for (key, _) in &fresh {
            log::info!("[assets] {} ready", key);
            self.reported.insert(key.clone());
        }
        fresh
    }

    pub fn draw(
        &self,
        ctx: &web::CanvasRenderingContext2d,
        key: &str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> bool {
        if !self.is_ready(key) {
            return false;
        }
        let res = match self.assets.get(key) {
            Some(Asset::Image(img)) => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
            }
            Some(Asset::Video(v)) => {
                ctx.draw_image_with_html_video_element_and_dw_and_dh(v, x, y, w, h)
            }
            None => return false,
        };
        res.is_ok()
    }

    /// Start a video asset; images ignore this.
    pub fn play(&self, key: &str) {
        if let Some(Asset::Video(v)) = self.assets.get(key) {
            match v.play() {
                Ok(_) => log::info!("[assets] playing {}", key),
                Err(e) => log::warn!("[assets] play {} failed: {:?}", key, e),
            }
        }
    }

    /// Stop and unload everything. Safe to call more than once.
    pub fn release(&mut self) {
        for (_, asset) in self.assets.drain() {
            match asset {
                Asset::Video(v) => {
                    _ = v.pause();
                    _ = v.remove_attribute("src");
                    v.load();
                }
                Asset::Image(img) => img.set_src(""),
            }
        }
        self.reported.clear();
    }
}
