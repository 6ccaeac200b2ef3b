//! Lumen studio: interactive 2D light-transport editor.
//!
//! Mouse: left click adds creation points or selects, left drag moves the selection,
//! right drag pans, wheel zooms.
//! Keys: C / T start a circle / triangle, Esc aborts, Delete removes the selection,
//! D toggles dispersion, 1-4 apply diffuse / mirror / glass / light, 5 cycles the
//! diffuse colour, 6 cycles the emission colour.

mod editor;
mod presets;

use anyhow::Result;

use lumen_engine::coords::ColorRgba;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::render::{LightConfig, LightRenderer, OverlayList, OverlayRenderer, OverlayStyle};
use lumen_engine::scene::SceneModel;
use lumen_engine::window::{Runtime, RuntimeConfig};

use editor::Editor;

struct Studio {
    editor: Editor,
    light: LightRenderer,
    overlay: OverlayRenderer,
    overlay_list: OverlayList,
    title: String,
}

impl Studio {
    fn new(mut scene: SceneModel) -> Self {
        // The renderer starts empty; everything must be uploaded once.
        scene.sync_all();
        Self {
            editor: Editor::new(scene, OverlayStyle::default()),
            light: LightRenderer::new(LightConfig::default()),
            overlay: OverlayRenderer::new(),
            overlay_list: OverlayList::new(),
            title: String::new(),
        }
    }
}

impl App for Studio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // ── Input ─────────────────────────────────────────────────────────
        self.editor.handle_frame(ctx.window.viewport(), &ctx.input_frame.events);

        let status = self.editor.status();
        if status != self.title {
            ctx.window.set_title(&status);
            self.title = status;
        }

        // ── Sync + overlay ────────────────────────────────────────────────
        self.editor.scene_mut().flush(&mut self.light);
        self.editor.build_overlay(&mut self.overlay_list);

        // ── Render ────────────────────────────────────────────────────────
        let frame_index = ctx.time.frame_index;
        let light = &mut self.light;
        let overlay = &mut self.overlay;
        let list = &self.overlay_list;

        ctx.render(ColorRgba::black(), |rctx, target| {
            light.render(rctx, target, frame_index);
            overlay.render(rctx, target, list);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("starting lumen studio");

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        Studio::new(SceneModel::new()),
    )
}
