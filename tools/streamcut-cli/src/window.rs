//! Interactive selection window.
//!
//! The pipeline runs on a worker thread and talks to the window through a
//! pair of channels: frames (reference and overlay redraws) flow in, pointer
//! and key events flow out. The window itself holds no selection state; it is
//! only a display collaborator.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use eframe::egui::{self, Color32};
use streamcut_clip_model::{Frame, SurfaceEvent};
use streamcut_common::{StreamcutError, StreamcutResult};
use streamcut_render_engine::{run_cut, CutJob, FfmpegBackend};
use streamcut_selection_core::SelectionSurface;

/// Run the full cut pipeline with an interactive window surface.
///
/// Blocks until the window closes. The pipeline result is joined back from
/// the worker thread and propagated.
pub fn run_windowed(job: CutJob, backend: FfmpegBackend) -> anyhow::Result<()> {
    let (frame_tx, frame_rx) = mpsc::channel::<Frame>();
    let (event_tx, event_rx) = mpsc::channel::<SurfaceEvent>();
    let (done_tx, done_rx) = mpsc::channel::<Option<String>>();

    let worker = std::thread::spawn(move || -> StreamcutResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        tracing::debug!("pipeline worker started");
        let mut surface = ChannelSurface { frame_tx, event_rx };
        let result = runtime.block_on(run_cut(job, &backend, &mut surface));
        let _ = done_tx.send(result.as_ref().err().map(|e| e.to_string()));
        result
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Streamcut Selection")
            .with_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    let window_result = eframe::run_native(
        "Streamcut Selection",
        options,
        Box::new(move |_cc| {
            Box::new(SelectionWindow {
                frame_rx,
                event_tx,
                done_rx,
                texture: None,
                frame_size: (0, 0),
                status: "Drag to select the webcam region. Enter confirms, Esc aborts."
                    .to_string(),
                finished: false,
            })
        }),
    );

    let pipeline = worker
        .join()
        .map_err(|_| anyhow::anyhow!("pipeline worker panicked"))?;
    window_result.map_err(|e| anyhow::anyhow!("selection window failed: {e}"))?;
    pipeline?;
    Ok(())
}

/// The worker-thread side of the window seam.
struct ChannelSurface {
    frame_tx: Sender<Frame>,
    event_rx: Receiver<SurfaceEvent>,
}

impl SelectionSurface for ChannelSurface {
    fn present(&mut self, frame: &Frame) -> StreamcutResult<()> {
        // A closed window disconnects the channel; treat it as an abort.
        self.frame_tx
            .send(frame.clone())
            .map_err(|_| StreamcutError::UserAbort)
    }

    fn next_event(&mut self) -> StreamcutResult<SurfaceEvent> {
        self.event_rx.recv().map_err(|_| StreamcutError::UserAbort)
    }
}

struct SelectionWindow {
    frame_rx: Receiver<Frame>,
    event_tx: Sender<SurfaceEvent>,
    done_rx: Receiver<Option<String>>,
    texture: Option<egui::TextureHandle>,
    frame_size: (u32, u32),
    status: String,
    finished: bool,
}

impl SelectionWindow {
    fn poll_worker(&mut self, ctx: &egui::Context) {
        // Keep only the most recent frame; intermediate redraws are stale.
        let mut latest = None;
        loop {
            match self.frame_rx.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        if let Some(frame) = latest {
            self.frame_size = (frame.width(), frame.height());
            let color = egui::ColorImage::from_rgb(
                [frame.width() as usize, frame.height() as usize],
                frame.as_raw(),
            );
            self.texture = Some(ctx.load_texture("reference", color, egui::TextureOptions::LINEAR));
        }

        match self.done_rx.try_recv() {
            Ok(None) => {
                self.finished = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Ok(Some(error)) => {
                self.finished = true;
                self.status = error;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
        }
    }

    fn send_event(&self, event: SurfaceEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Map a window position inside `rect` to frame pixel coordinates.
    fn to_frame_coords(&self, rect: egui::Rect, pos: egui::Pos2) -> (u32, u32) {
        let (fw, fh) = (self.frame_size.0 as f32, self.frame_size.1 as f32);
        let x = ((pos.x - rect.left()) / rect.width() * fw).clamp(0.0, fw) as u32;
        let y = ((pos.y - rect.top()) / rect.height() * fh).clamp(0.0, fh) as u32;
        (x, y)
    }
}

impl eframe::App for SelectionWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(Duration::from_millis(16));
        self.poll_worker(ctx);

        if !self.finished {
            ctx.input(|i| {
                if i.key_pressed(egui::Key::Enter) {
                    self.send_event(SurfaceEvent::Confirm);
                }
                if i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Q) {
                    self.send_event(SurfaceEvent::Abort);
                }
            });
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(12)))
            .show(ctx, |ui| {
                let Some(texture) = self.texture.as_ref() else {
                    ui.centered_and_justified(|ui| {
                        ui.label("Decoding reference frame...");
                    });
                    return;
                };

                let (fw, fh) = (self.frame_size.0 as f32, self.frame_size.1 as f32);
                let available = ui.available_size();
                let scale = (available.x / fw).min(available.y / fh).min(1.0);
                let size = egui::vec2(fw * scale, fh * scale);

                let response = ui.add(
                    egui::Image::new(texture)
                        .fit_to_exact_size(size)
                        .sense(egui::Sense::click_and_drag()),
                );

                if let Some(pos) = response.interact_pointer_pos() {
                    let (x, y) = self.to_frame_coords(response.rect, pos);
                    if response.drag_started() {
                        self.send_event(SurfaceEvent::down(x, y));
                    } else if response.dragged() {
                        self.send_event(SurfaceEvent::drag(x, y));
                    }
                    if response.drag_stopped() {
                        self.send_event(SurfaceEvent::up(x, y));
                    }
                }
            });
    }
}
