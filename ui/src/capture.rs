//! Webcam access and frame capture.
//!
//! The camera is an explicit resource with start/capture/release rather than
//! a stream left to the garbage collector: releasing stops every track so
//! the browser's recording indicator goes dark the moment scanning stops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
const FALLBACK_WIDTH: u32 = 640;
#[cfg(target_arch = "wasm32")]
const FALLBACK_HEIGHT: u32 = 480;
#[cfg(target_arch = "wasm32")]
const JPEG_MIME: &str = "image/jpeg";

pub struct Camera {
    /// DOM id of the `<video>` element frames are read from.
    video_id: String,
    #[cfg(target_arch = "wasm32")]
    stream: Option<web_sys::MediaStream>,
}

impl Camera {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            #[cfg(target_arch = "wasm32")]
            stream: None,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Requests the webcam and wires the stream into the video element.
    /// Starting over an already-running camera releases the old stream first,
    /// so at most one set of tracks is ever live.
    #[cfg(target_arch = "wasm32")]
    pub async fn start(&mut self) -> Result<(), String> {
        self.release();

        let devices = web_sys::window()
            .ok_or("no window")?
            .navigator()
            .media_devices()
            .map_err(|_| "media devices unavailable".to_string())?;

        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|_| "camera request rejected".to_string())?;
        let stream = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|_| "camera permission denied".to_string())?;
        let stream: web_sys::MediaStream = stream
            .dyn_into()
            .map_err(|_| "unexpected media stream type".to_string())?;

        let video = self.video_element()?;
        video.set_src_object(Some(&stream));
        // play() returns a promise we deliberately do not await; autoplay
        // failures surface as a frozen preview, not a hang.
        let _ = video.play();

        self.stream = Some(stream);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn start(&mut self) -> Result<(), String> {
        Err("camera capture requires a browser".to_string())
    }

    /// Grabs the current video frame as a JPEG data URL, sized to the actual
    /// video dimensions with a fallback when metadata has not loaded yet.
    #[cfg(target_arch = "wasm32")]
    pub fn capture_frame(&self) -> Result<String, String> {
        let video = self.video_element()?;

        let width = match video.video_width() {
            0 => FALLBACK_WIDTH,
            w => w,
        };
        let height = match video.video_height() {
            0 => FALLBACK_HEIGHT,
            h => h,
        };

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or("no document")?;
        let canvas: web_sys::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| "canvas creation failed".to_string())?
            .dyn_into()
            .map_err(|_| "canvas creation failed".to_string())?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: web_sys::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or("2d context unavailable")?
            .dyn_into()
            .map_err(|_| "2d context unavailable".to_string())?;
        context
            .draw_image_with_html_video_element_and_dw_and_dh(
                &video,
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            )
            .map_err(|_| "frame draw failed".to_string())?;

        canvas
            .to_data_url_with_type(JPEG_MIME)
            .map_err(|_| "jpeg encoding failed".to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn capture_frame(&self) -> Result<String, String> {
        Err("camera capture requires a browser".to_string())
    }

    /// Stops every track and detaches the stream from the video element.
    /// Safe to call repeatedly or before `start`.
    #[cfg(target_arch = "wasm32")]
    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                    track.stop();
                }
            }
        }
        if let Ok(video) = self.video_element() {
            video.set_src_object(None);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn release(&mut self) {}

    pub fn is_running(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.stream.is_some()
        }

        #[cfg(not(target_arch = "wasm32"))]
        false
    }

    #[cfg(target_arch = "wasm32")]
    fn video_element(&self) -> Result<web_sys::HtmlVideoElement, String> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&self.video_id))
            .and_then(|element| element.dyn_into().ok())
            .ok_or_else(|| format!("video element '{}' not found", self.video_id))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn native_camera_refuses_politely() {
        let mut camera = Camera::new("preview");
        assert!(!camera.is_running());
        assert!(camera.start().await.is_err());
        assert!(camera.capture_frame().is_err());
        camera.release();
    }
}
