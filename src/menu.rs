//! Emote picker front-end: visibility, category/search filtering, favorites,
//! keybind context menu and the draggable compact panel.

use crate::constants::*;
use crate::dom;
use crate::events::{client_pos, WindowListener};
use crate::frame::Timer;
use crate::host::NuiBridge;
use crate::overlay;
use crate::storage::LocalStore;
use fnv::FnvHashMap;
use instant::{Duration, Instant};
use overlay_core::constants::SEARCH_DEBOUNCE_MS;
use overlay_core::i18n::{self, pick_welcome};
use overlay_core::{
    menu_position, slots_from_response, Catalog, ContextMenu, Debouncer, Emote, HostBridge,
    HostCommand, KeyValueStore, MemoryStore, PanelDrag, Preferences, ScrollSaver, Selection,
    Strings,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct MenuState {
    visible: bool,
    catalog: Catalog,
    prefs: Preferences,
    selection: Selection,
    search: String,
    search_debounce: Debouncer<String>,
    scroll: ScrollSaver,
    strings: &'static Strings,
    context_menu: Option<ContextMenu>,
    // bumped on every open/close; stale keybind replies are dropped
    epoch: u64,
    panel: PanelDrag,
}

struct MenuElements {
    root: web::HtmlElement,
    categories: web::HtmlElement,
    grid: web::HtmlElement,
    context: web::HtmlElement,
    search: web::HtmlInputElement,
    top_bar: web::HtmlElement,
}

pub struct MenuShell {
    state: RefCell<MenuState>,
    host: Rc<NuiBridge>,
    store: Box<dyn KeyValueStore>,
    document: web::Document,
    el: MenuElements,
    search_timer: Timer,
    scroll_timer: Timer,
    panel_listeners: RefCell<Option<(WindowListener, WindowListener)>>,
}

impl MenuShell {
    pub fn new(document: &web::Document, host: Rc<NuiBridge>) -> anyhow::Result<Rc<Self>> {
        let search = dom::by_id(document, SEARCH_INPUT_ID)?
            .dyn_into::<web::HtmlInputElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not an input: {:?}", SEARCH_INPUT_ID, e))?;
        let el = MenuElements {
            root: dom::by_id(document, MENU_ROOT_ID)?,
            categories: dom::by_id(document, CATEGORY_LIST_ID)?,
            grid: dom::by_id(document, EMOTE_GRID_ID)?,
            context: dom::by_id(document, CONTEXT_MENU_ID)?,
            search,
            top_bar: dom::by_id(document, TOP_BAR_ID)?,
        };
        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Some(s) => Box::new(s),
            None => {
                log::warn!("[prefs] localStorage unavailable, preferences will not persist");
                Box::new(MemoryStore::new())
            }
        };
        let prefs = Preferences::load(store.as_ref());
        let state = MenuState {
            visible: false,
            catalog: Catalog::default(),
            prefs,
            selection: Selection::All,
            search: String::new(),
            search_debounce: Debouncer::new(Duration::from_millis(SEARCH_DEBOUNCE_MS)),
            scroll: ScrollSaver::default(),
            strings: &i18n::EN,
            context_menu: None,
            epoch: 0,
            panel: PanelDrag::default(),
        };
        let shell = Rc::new_cyclic(|weak: &Weak<MenuShell>| {
            let on_search = weak.clone();
            let on_scroll = weak.clone();
            MenuShell {
                state: RefCell::new(state),
                host,
                store,
                document: document.clone(),
                el,
                search_timer: Timer::new(move || {
                    if let Some(s) = on_search.upgrade() {
                        s.on_search_timer();
                    }
                }),
                scroll_timer: Timer::new(move || {
                    if let Some(s) = on_scroll.upgrade() {
                        s.on_scroll_timer();
                    }
                }),
                panel_listeners: RefCell::new(None),
            }
        });
        shell.wire();
        shell.apply_compact();
        Ok(shell)
    }

    fn wire(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.categories, "click", move |ev: web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                s.on_category_click(&ev);
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.grid, "click", move |ev: web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                s.on_grid_click(&ev);
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.grid, "contextmenu", move |ev: web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                s.on_grid_context_menu(&ev);
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.grid, "scroll", move |_: web::Event| {
            if let Some(s) = weak.upgrade() {
                s.on_scroll();
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.context, "click", move |ev: web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                s.on_context_click(&ev);
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.document, "mousedown", move |ev: web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                s.on_document_down(&ev);
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.search, "input", move |_: web::Event| {
            if let Some(s) = weak.upgrade() {
                s.on_search_input();
            }
        });
        let weak = Rc::downgrade(self);
        dom::listen(&self.el.top_bar, "mousedown", move |ev: web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                s.on_header_down(&ev);
            }
        });
        let weak = Rc::downgrade(self);
        dom::add_click_listener(&self.document, CLEAR_SEARCH_ID, move || {
            if let Some(s) = weak.upgrade() {
                s.clear_search();
            }
        });
        let weak = Rc::downgrade(self);
        dom::add_click_listener(&self.document, COMPACT_TOGGLE_ID, move || {
            if let Some(s) = weak.upgrade() {
                s.toggle_compact();
            }
        });
        let weak = Rc::downgrade(self);
        dom::add_click_listener(&self.document, RESET_BUTTON_ID, move || {
            if let Some(s) = weak.upgrade() {
                s.request_reset();
            }
        });
        let weak = Rc::downgrade(self);
        dom::add_click_listener(&self.document, EXIT_BUTTON_ID, move || {
            if let Some(s) = weak.upgrade() {
                s.close();
            }
        });
    }

    // ---------------- Host signals ----------------

    /// Switch the UI strings; the host sends a locale with `setVisible`.
    pub fn set_locale(&self, strings: &'static Strings) {
        let placeholder = {
            let mut st = self.state.borrow_mut();
            st.strings = strings;
            strings.search_placeholder(st.selection.key())
        };
        if let Some(html) = self.document.document_element() {
            _ = html.set_attribute("lang", strings.code);
        }
        self.el.search.set_placeholder(&placeholder);
        dom::set_text(&self.document, MENU_TITLE_ID, strings.menu_title);
        dom::set_text(&self.document, RESET_BUTTON_ID, strings.reset_button);
        dom::set_text(&self.document, EXIT_BUTTON_ID, strings.exit_button);
        log::info!("[menu] locale={}", strings.code);
        self.render();
    }

    pub fn set_visible(&self, status: bool) {
        {
            let mut st = self.state.borrow_mut();
            if st.visible == status {
                return;
            }
            st.visible = status;
            st.epoch += 1;
            st.context_menu = None;
        }
        log::info!("[menu] visible={}", status);
        if status {
            overlay::show(&self.el.root);
            let messages = self.state.borrow().strings.welcome_messages;
            let mut rng = rand::thread_rng();
            if let Some(msg) = pick_welcome(messages, &mut rng) {
                dom::set_text(&self.document, WELCOME_ID, msg);
            }
            self.render();
        } else {
            overlay::hide(&self.el.root);
            self.render_context_menu();
        }
    }

    pub fn load_emotes(&self, all: Vec<Emote>, categories: FnvHashMap<String, Vec<Emote>>) {
        let catalog = Catalog::new(all, categories);
        log::info!(
            "[menu] catalog loaded: {} categories",
            catalog.sorted_category_keys().len()
        );
        self.state.borrow_mut().catalog = catalog;
        self.render();
    }

    /// Exit button and Escape. The host is told even when already hidden.
    pub fn close(&self) {
        self.set_visible(false);
        self.host.send(HostCommand::Close);
    }

    /// Host-initiated reset: local preferences only.
    pub fn reset_settings(&self) {
        self.clear_preferences();
    }

    /// Reset button: clear locally and tell the host.
    fn request_reset(&self) {
        self.clear_preferences();
        self.host.send(HostCommand::ResetSettings);
    }

    fn clear_preferences(&self) {
        {
            let mut st = self.state.borrow_mut();
            if let Err(e) = st.prefs.reset(self.store.as_ref()) {
                log::warn!("[prefs] reset failed: {}", e);
            }
            st.scroll.cancel();
        }
        self.scroll_timer.cancel();
        self.apply_compact();
        self.render();
    }

    // ---------------- Rendering ----------------

    fn render(&self) {
        self.render_categories();
        self.render_grid();
        self.render_context_menu();
    }

    fn render_categories(&self) {
        let st = self.state.borrow();
        let entries = st.catalog.entries(&st.prefs.favorites);
        self.el
            .categories
            .set_inner_html(&overlay::category_list_html(&entries, &st.selection));
    }

    fn render_grid(&self) {
        let st = self.state.borrow();
        let emotes = st
            .catalog
            .filter(&st.selection, &st.search, &st.prefs.favorites);
        let mut html = String::new();
        for e in &emotes {
            html.push_str(&overlay::emote_card_html(
                e,
                st.prefs.favorites.contains(&e.name),
                st.strings,
            ));
        }
        self.el.grid.set_inner_html(&html);
    }

    fn render_context_menu(&self) {
        let st = self.state.borrow();
        match &st.context_menu {
            Some(menu) => {
                self.el.context.set_inner_html(&overlay::context_menu_html(menu, st.strings));
                dom::set_class(&self.el.context, HIDDEN_CLASS, false);
                let size = glam::Vec2::new(
                    self.el.context.offset_width() as f32,
                    self.el.context.offset_height() as f32,
                );
                let parent = self
                    .el
                    .context
                    .parent_element()
                    .map(|p| {
                        let r = p.get_bounding_client_rect();
                        glam::Vec2::new(r.left() as f32, r.top() as f32)
                    })
                    .unwrap_or(glam::Vec2::ZERO);
                let pos = menu_position(menu.anchor, size, dom::viewport_size(), parent);
                let style = self.el.context.style();
                _ = style.set_property("left", &format!("{}px", pos.x));
                _ = style.set_property("top", &format!("{}px", pos.y));
            }
            None => {
                dom::set_class(&self.el.context, HIDDEN_CLASS, true);
                self.el.context.set_inner_html("");
            }
        }
    }

    fn apply_compact(&self) {
        let st = self.state.borrow();
        dom::set_class(&self.el.root, COMPACT_CLASS, st.prefs.compact);
        dom::set_class(&self.el.top_bar, DRAGGABLE_CLASS, st.prefs.compact);
        let transform = if st.prefs.compact {
            let p = st.prefs.compact_position;
            format!("translate({}px, {}px)", p.x, p.y)
        } else {
            String::new()
        };
        _ = self.el.root.style().set_property("transform", &transform);
    }

    // ---------------- Interaction ----------------

    fn on_category_click(&self, ev: &web::MouseEvent) {
        let Some(key) = dom::closest_with_attr(ev, DATA_CATEGORY)
            .and_then(|el| el.get_attribute(DATA_CATEGORY))
        else {
            return;
        };
        // the pending offset belongs to the category being left
        self.scroll_timer.cancel();
        let (top, placeholder) = {
            let mut st = self.state.borrow_mut();
            let MenuState { scroll, prefs, .. } = &mut *st;
            if scroll.flush(prefs) {
                if let Err(e) = prefs.save_scroll_positions(self.store.as_ref()) {
                    log::warn!("[prefs] saving scroll positions failed: {}", e);
                }
            }
            st.selection = Selection::from_key(&key);
            (st.prefs.scroll_for(&key), st.strings.search_placeholder(&key))
        };
        self.el.search.set_placeholder(&placeholder);
        self.render_categories();
        self.render_grid();
        self.el.grid.set_scroll_top(top as i32);
    }

    fn on_grid_click(&self, ev: &web::MouseEvent) {
        let Some(emote) = self.emote_at(ev) else {
            return;
        };
        let action = dom::closest_with_attr(ev, DATA_ACTION)
            .and_then(|el| el.get_attribute(DATA_ACTION))
            .unwrap_or_default();
        match action.as_str() {
            "favorite" => {
                let now_fav = {
                    let mut st = self.state.borrow_mut();
                    let on = st.prefs.favorites.toggle(&emote.name);
                    if let Err(e) = st.prefs.save_favorites(self.store.as_ref()) {
                        log::warn!("[prefs] saving favorites failed: {}", e);
                    }
                    on
                };
                log::debug!("[menu] favorite {} = {}", emote.name, now_fav);
                self.render_categories();
                self.render_grid();
            }
            "position" if emote.offers_positioning() => {
                self.host.send(HostCommand::PlayEmoteWithPositioning {
                    name: emote.name,
                    category: emote.category,
                });
            }
            _ => {
                self.host.send(HostCommand::PlayEmote {
                    name: emote.name,
                    category: emote.category,
                });
            }
        }
    }

    fn on_grid_context_menu(self: &Rc<Self>, ev: &web::MouseEvent) {
        ev.prevent_default();
        let Some(emote) = self.emote_at(ev) else {
            return;
        };
        if !emote.offers_keybinds() {
            return;
        }
        let anchor = client_pos(ev);
        let epoch = self.state.borrow().epoch;
        let me = self.clone();
        spawn_local(async move {
            let reply = match me.host.request(&HostCommand::GetKeybinds).await {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("[host] getKeybinds failed: {:?}", e);
                    serde_json::Value::Null
                }
            };
            {
                let mut st = me.state.borrow_mut();
                if !st.visible || st.epoch != epoch {
                    return;
                }
                st.context_menu = Some(ContextMenu::new(
                    &emote.name,
                    &emote.label,
                    slots_from_response(&reply),
                    anchor,
                ));
            }
            me.render_context_menu();
        });
    }

    fn on_context_click(&self, ev: &web::MouseEvent) {
        let Some(target) = dom::closest_with_attr(ev, DATA_SLOT) else {
            return;
        };
        let slot: u32 = match target.get_attribute(DATA_SLOT).and_then(|s| s.parse().ok()) {
            Some(n) => n,
            None => return,
        };
        let action = target.get_attribute(DATA_ACTION).unwrap_or_default();
        let command = {
            let mut st = self.state.borrow_mut();
            let command = st.context_menu.as_ref().and_then(|m| match action.as_str() {
                "bind" => m.bind(slot),
                "delete" => m.delete(slot),
                _ => None,
            });
            st.context_menu = None;
            command
        };
        if let Some(cmd) = command {
            self.host.send(cmd);
        }
        self.render_context_menu();
    }

    fn on_document_down(&self, ev: &web::MouseEvent) {
        if self.state.borrow().context_menu.is_none() {
            return;
        }
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Node>().ok())
            .is_some_and(|n| self.el.context.contains(Some(&n)));
        if !inside {
            self.state.borrow_mut().context_menu = None;
            self.render_context_menu();
        }
    }

    fn emote_at(&self, ev: &web::MouseEvent) -> Option<Emote> {
        let name = dom::closest_with_attr(ev, DATA_EMOTE)?.get_attribute(DATA_EMOTE)?;
        self.state.borrow().catalog.find(&name).cloned()
    }

    // ---------------- Debounced inputs ----------------

    fn on_search_input(&self) {
        let value = self.el.search.value();
        let now = Instant::now();
        let delay = {
            let mut st = self.state.borrow_mut();
            st.search_debounce.push(value, now);
            st.search_debounce.remaining(now)
        };
        if let Some(d) = delay {
            self.search_timer.arm(d);
        }
    }

    fn on_search_timer(&self) {
        self.search_timer.fired();
        let due = self.state.borrow_mut().search_debounce.poll(Instant::now());
        match due {
            Some(term) => {
                self.state.borrow_mut().search = term;
                self.render_grid();
            }
            None => {
                let remaining = self.state.borrow().search_debounce.remaining(Instant::now());
                if let Some(d) = remaining {
                    self.search_timer.arm(d);
                }
            }
        }
    }

    fn clear_search(&self) {
        self.el.search.set_value("");
        self.search_timer.cancel();
        {
            let mut st = self.state.borrow_mut();
            st.search_debounce.cancel();
            st.search.clear();
        }
        self.render_grid();
    }

    fn on_scroll(&self) {
        let top = self.el.grid.scroll_top() as f64;
        let delay = {
            let mut st = self.state.borrow_mut();
            let key = st.selection.key().to_string();
            st.scroll.scrolled(&key, top, Instant::now())
        };
        self.scroll_timer.arm(delay);
    }

    fn on_scroll_timer(&self) {
        self.scroll_timer.fired();
        let now = Instant::now();
        let mut st = self.state.borrow_mut();
        let MenuState { scroll, prefs, .. } = &mut *st;
        if scroll.poll(now, prefs) {
            if let Err(e) = prefs.save_scroll_positions(self.store.as_ref()) {
                log::warn!("[prefs] saving scroll positions failed: {}", e);
            }
        } else if let Some(d) = scroll.remaining(now) {
            self.scroll_timer.arm(d);
        }
    }

    // ---------------- Compact panel ----------------

    fn toggle_compact(&self) {
        {
            let mut st = self.state.borrow_mut();
            st.prefs.compact = !st.prefs.compact;
            if let Err(e) = st.prefs.save_compact(self.store.as_ref()) {
                log::warn!("[prefs] saving compact state failed: {}", e);
            }
        }
        self.apply_compact();
    }

    fn on_header_down(self: &Rc<Self>, ev: &web::MouseEvent) {
        let grabbed = {
            let mut st = self.state.borrow_mut();
            // buttons and the search box keep their own clicks
            let on_control = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .and_then(|el| el.closest("button, input").ok().flatten())
                .is_some();
            let compact = st.prefs.compact;
            let current = st.prefs.compact_position;
            st.panel.press(compact && !on_control, client_pos(ev), current)
        };
        if !grabbed {
            return;
        }
        let on_move = Rc::downgrade(self);
        let on_up = Rc::downgrade(self);
        *self.panel_listeners.borrow_mut() = Some((
            WindowListener::attach("mousemove", move |ev| {
                if let Some(s) = on_move.upgrade() {
                    s.on_panel_move(&ev);
                }
            }),
            WindowListener::attach("mouseup", move |_| {
                if let Some(s) = on_up.upgrade() {
                    s.on_panel_up();
                }
            }),
        ));
    }

    fn on_panel_move(&self, ev: &web::MouseEvent) {
        let moved = {
            let mut st = self.state.borrow_mut();
            match st.panel.moved(client_pos(ev)) {
                Some(p) => {
                    st.prefs.compact_position = p;
                    true
                }
                None => false,
            }
        };
        if moved {
            self.apply_compact();
        }
    }

    fn on_panel_up(&self) {
        {
            let mut st = self.state.borrow_mut();
            st.panel.release();
            if let Err(e) = st.prefs.save_compact(self.store.as_ref()) {
                log::warn!("[prefs] saving panel position failed: {}", e);
            }
        }
        // detach after this callback returns; dropping the closure mid-call is not allowed
        let taken = self.panel_listeners.borrow_mut().take();
        if let Some(listeners) = taken {
            spawn_local(async move {
                drop(listeners);
            });
        }
    }
}
