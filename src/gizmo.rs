//! DOM front-end for the positioning gizmo.
//!
//! `GizmoShell` forwards browser events to `GizmoController` and applies its
//! decisions: window pointer listeners exist only while active, the smoothing
//! loop runs on animation frames, and host syncs fire from a debounce timer.

use crate::constants::*;
use crate::dom;
use crate::events::{client_pos, PointerListeners};
use crate::frame::{FrameLoop, Timer};
use crate::host::NuiBridge;
use instant::{Duration, Instant};
use overlay_core::{
    i18n, Axis, GizmoController, Offset, Placement, ProjectionTick, Readout, Strings, Transition,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use web_sys as web;

struct GizmoView {
    document: web::Document,
    overlay: web::HtmlElement,
    container: web::HtmlElement,
    strings: Cell<&'static Strings>,
}

impl GizmoView {
    fn find(document: &web::Document) -> anyhow::Result<Self> {
        Ok(Self {
            document: document.clone(),
            overlay: dom::by_id(document, GIZMO_OVERLAY_ID)?,
            container: dom::by_id(document, GIZMO_CONTAINER_ID)?,
            strings: Cell::new(&i18n::EN),
        })
    }

    fn set_mounted(&self, on: bool) {
        dom::set_class(&self.overlay, HIDDEN_CLASS, !on);
    }

    fn center(&self) -> glam::Vec2 {
        dom::rect_center(&self.container)
    }

    fn apply_placement(&self, p: &Placement) {
        let style = self.container.style();
        if p.is_visible() {
            _ = style.set_property("transform", &p.css_transform());
            _ = style.set_property("opacity", "1");
        } else {
            // transform left as is; only hide
            _ = style.set_property("opacity", "0");
        }
    }

    fn paint_handles(&self, controller: &GizmoController) {
        for axis in Axis::ALL {
            let id = format!("{}{}", HANDLE_ID_PREFIX, axis);
            if let Ok(el) = dom::by_id(&self.document, &id) {
                _ = el
                    .style()
                    .set_property(AXIS_COLOR_PROPERTY, controller.handle_color(axis));
            }
        }
    }

    fn paint_readout(&self, visual: Offset) {
        let r = Readout::of(visual);
        dom::set_text(&self.document, GIZMO_READOUT_X_ID, &r.x);
        dom::set_text(&self.document, GIZMO_READOUT_Y_ID, &r.y);
        dom::set_text(&self.document, GIZMO_READOUT_Z_ID, &r.z);
        dom::set_text(
            &self.document,
            GIZMO_READOUT_ROT_ID,
            &format!("{}: {}", self.strings.get().rotation, r.rotation),
        );
    }
}

pub struct GizmoShell {
    controller: RefCell<GizmoController>,
    host: Rc<NuiBridge>,
    view: GizmoView,
    listeners: RefCell<Option<PointerListeners>>,
    frames: FrameLoop,
    sync_timer: Timer,
}

impl GizmoShell {
    pub fn set_locale(&self, strings: &'static Strings) {
        let doc = &self.view.document;
        self.view.strings.set(strings);
        dom::set_text(doc, GIZMO_TITLE_ID, strings.gizmo_title);
        dom::set_text(doc, GIZMO_INSTRUCTIONS_ID, strings.gizmo_instructions);
        dom::set_text(doc, GIZMO_SAVE_ID, strings.save_button);
        dom::set_text(doc, GIZMO_CANCEL_ID, strings.cancel_button);
        let visual = self.controller.borrow().visual();
        self.view.paint_readout(visual);
    }

    pub fn new(document: &web::Document, host: Rc<NuiBridge>) -> anyhow::Result<Rc<Self>> {
        let view = GizmoView::find(document)?;
        view.set_mounted(false);
        let shell = Rc::new_cyclic(|weak: &Weak<GizmoShell>| {
            let on_frame = weak.clone();
            let on_sync = weak.clone();
            GizmoShell {
                controller: RefCell::new(GizmoController::default()),
                host,
                view,
                listeners: RefCell::new(None),
                frames: FrameLoop::new(move || {
                    if let Some(s) = on_frame.upgrade() {
                        s.on_frame();
                    }
                }),
                sync_timer: Timer::new(move || {
                    if let Some(s) = on_sync.upgrade() {
                        s.on_sync_timer();
                    }
                }),
            }
        });
        shell.wire_handles(document);
        shell.wire_buttons(document);
        Ok(shell)
    }

    fn wire_handles(self: &Rc<Self>, document: &web::Document) {
        for axis in Axis::ALL {
            let id = format!("{}{}", HANDLE_ID_PREFIX, axis);
            let Some(el) = document.get_element_by_id(&id) else {
                log::warn!("[gizmo] missing handle #{}", id);
                continue;
            };
            let weak = Rc::downgrade(self);
            dom::listen(&el, "mousedown", move |ev: web::MouseEvent| {
                if let Some(s) = weak.upgrade() {
                    s.on_handle_down(axis, &ev);
                }
            });
            let weak = Rc::downgrade(self);
            dom::listen(&el, "mouseenter", move |_: web::MouseEvent| {
                if let Some(s) = weak.upgrade() {
                    s.controller.borrow_mut().hover_enter(axis);
                    s.view.paint_handles(&s.controller.borrow());
                }
            });
            let weak = Rc::downgrade(self);
            dom::listen(&el, "mouseleave", move |_: web::MouseEvent| {
                if let Some(s) = weak.upgrade() {
                    s.controller.borrow_mut().hover_leave();
                    s.view.paint_handles(&s.controller.borrow());
                }
            });
        }
        // the secondary button is camera control here, never a context menu
        dom::listen(&self.view.overlay, "contextmenu", |ev: web::MouseEvent| {
            ev.prevent_default();
        });
    }

    fn wire_buttons(self: &Rc<Self>, document: &web::Document) {
        let weak = Rc::downgrade(self);
        dom::add_click_listener(document, GIZMO_SAVE_ID, move || {
            if let Some(s) = weak.upgrade() {
                s.save();
            }
        });
        let weak = Rc::downgrade(self);
        dom::add_click_listener(document, GIZMO_CANCEL_ID, move || {
            if let Some(s) = weak.upgrade() {
                s.cancel();
            }
        });
    }

    // ---------------- Host signals ----------------

    pub fn show(self: &Rc<Self>, status: bool) {
        let t = self
            .controller
            .borrow_mut()
            .show(status, Instant::now(), self.host.as_ref());
        self.apply_transition(t);
    }

    pub fn projection(&self, tick: &ProjectionTick) {
        let placement = self.controller.borrow_mut().apply_projection(tick);
        if self.controller.borrow().is_active() {
            self.view.apply_placement(&placement);
        }
    }

    pub fn save(self: &Rc<Self>) {
        let t = self.controller.borrow_mut().save(self.host.as_ref());
        self.apply_transition(t);
    }

    pub fn cancel(self: &Rc<Self>) {
        let t = self.controller.borrow_mut().cancel(self.host.as_ref());
        self.apply_transition(t);
    }

    fn apply_transition(self: &Rc<Self>, t: Transition) {
        match t {
            Transition::Activated => {
                {
                    let mut slot = self.listeners.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(PointerListeners::for_gizmo(Rc::downgrade(self)));
                    }
                }
                self.view.set_mounted(true);
                let controller = self.controller.borrow();
                self.view.apply_placement(&controller.placement());
                self.view.paint_handles(&controller);
                self.view.paint_readout(controller.visual());
                drop(controller);
                self.frames.request();
                self.arm_sync();
            }
            Transition::Deactivated => {
                // drop detaches the window listeners
                self.listeners.borrow_mut().take();
                self.frames.cancel();
                self.sync_timer.cancel();
                self.view.set_mounted(false);
            }
            Transition::Unchanged => {}
        }
    }

    // ---------------- Pointer input ----------------

    fn on_handle_down(&self, axis: Axis, ev: &web::MouseEvent) {
        let center = self.view.center();
        let began = self
            .controller
            .borrow_mut()
            .handle_down(axis, ev.button(), client_pos(ev), center);
        if began {
            ev.prevent_default();
            ev.stop_propagation();
            self.view.paint_handles(&self.controller.borrow());
        }
    }

    pub(crate) fn on_window_down(&self, ev: &web::MouseEvent) {
        self.controller
            .borrow_mut()
            .pointer_down(ev.button(), self.host.as_ref());
    }

    pub(crate) fn on_window_move(&self, ev: &web::MouseEvent) {
        let center = self.view.center();
        let moved = self
            .controller
            .borrow_mut()
            .pointer_move(client_pos(ev), center, Instant::now());
        if moved.is_some() {
            self.arm_sync();
        }
    }

    pub(crate) fn on_window_up(&self, ev: &web::MouseEvent) {
        let ended = self
            .controller
            .borrow_mut()
            .pointer_up(ev.button(), self.host.as_ref());
        if ended.is_some() {
            self.view.paint_handles(&self.controller.borrow());
        }
    }

    // ---------------- Scheduled work ----------------

    fn on_frame(&self) {
        self.frames.fired();
        let (visual, again) = self.controller.borrow_mut().frame();
        if !again {
            return;
        }
        self.view.paint_readout(visual);
        self.frames.request();
    }

    fn arm_sync(&self) {
        let now = Instant::now();
        if let Some(deadline) = self.controller.borrow().sync_deadline() {
            let delay = if deadline > now {
                deadline - now
            } else {
                Duration::ZERO
            };
            self.sync_timer.arm(delay);
        }
    }

    fn on_sync_timer(&self) {
        self.sync_timer.fired();
        let sent = self
            .controller
            .borrow_mut()
            .flush_sync(Instant::now(), self.host.as_ref());
        if sent.is_none() {
            // woke a hair early; wait out the remainder
            self.arm_sync();
        }
    }
}
