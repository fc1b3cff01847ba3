//! Markup for the picker: sidebar rows, emote cards and the keybind menu.
//! Rendering is plain string building; clicks are handled by delegation on
//! the containers using the `data-*` attributes emitted here.

use crate::constants::*;
use crate::dom::escape_html;
use overlay_core::{CategoryEntry, ContextMenu, Emote, Selection, Strings};
use web_sys as web;

#[inline]
pub fn show(root: &web::Element) {
    crate::dom::set_class(root, VISIBLE_CLASS, true);
}

#[inline]
pub fn hide(root: &web::Element) {
    crate::dom::set_class(root, VISIBLE_CLASS, false);
}

pub fn category_list_html(entries: &[CategoryEntry], selected: &Selection) -> String {
    let mut html = String::new();
    for entry in entries {
        let key = entry.selection.key();
        let active = if entry.selection == *selected {
            ACTIVE_CLASS
        } else {
            ""
        };
        html.push_str(&format!(
            "<li class='category-item {}' {}='{}'><span>{}</span><span class='count'>{}</span></li>",
            active,
            DATA_CATEGORY,
            escape_html(key),
            escape_html(key),
            entry.count
        ));
    }
    html
}

pub fn emote_card_html(emote: &Emote, favorite: bool, strings: &Strings) -> String {
    let name = escape_html(&emote.name);
    let position_btn = if emote.offers_positioning() {
        format!(
            "<button class='emote-action-btn' {}='position' title='{}'>&#8982;</button>",
            DATA_ACTION,
            escape_html(strings.position_tooltip)
        )
    } else {
        String::new()
    };
    let fav_class = if favorite { "favorite active" } else { "favorite" };
    format!(
        "<div class='emote-card' {data_emote}='{name}' {data_action}='play'>\
           <div class='emote-info'>\
             <div class='name' title='{label}'>{label}</div>\
             <div class='command'>{command}</div>\
           </div>\
           <div class='emote-actions'>\
             <button class='emote-action-btn' {data_action}='play' title='{play}'>&#9654;</button>\
             {position_btn}\
             <button class='emote-action-btn {fav_class}' {data_action}='favorite' title='{fav}'>&#9829;</button>\
           </div>\
         </div>",
        data_emote = DATA_EMOTE,
        data_action = DATA_ACTION,
        name = name,
        label = escape_html(&emote.label),
        command = escape_html(&emote.command()),
        position_btn = position_btn,
        fav_class = fav_class,
        play = escape_html(strings.play_tooltip),
        fav = escape_html(strings.favorite_tooltip),
    )
}

pub fn context_menu_html(menu: &ContextMenu, strings: &Strings) -> String {
    let mut html = format!(
        "<div class='context-menu-header'>{}</div><ul class='context-menu-list'>",
        escape_html(&strings.context_header(&menu.label))
    );
    for (slot, bind) in menu.numbered() {
        let bound = match bind.emote.as_deref().filter(|e| !e.is_empty()) {
            Some(e) => format!("<span class='bound-emote'>{}</span>", escape_html(e)),
            None => format!(
                "<span class='bound-emote empty'>{}</span>",
                escape_html(strings.empty_slot)
            ),
        };
        let delete = if bind.is_occupied() {
            format!(
                "<button class='context-action-btn delete' {}='delete' {}='{}'>&#10005;</button>",
                DATA_ACTION, DATA_SLOT, slot
            )
        } else {
            String::new()
        };
        html.push_str(&format!(
            "<li class='context-menu-item'><div class='slot-info'><span>{title}</span>{bound}</div>\
             <div class='item-actions'><button class='context-action-btn bind' {action}='bind' {data_slot}='{slot}'>&#128279;</button>{delete}</div></li>",
            slot = slot,
            title = escape_html(&strings.quick_emote(slot)),
            bound = bound,
            action = DATA_ACTION,
            data_slot = DATA_SLOT,
            delete = delete,
        ));
    }
    html.push_str(&format!(
        "</ul><div class='context-menu-footer'>{}</div>",
        escape_html(strings.context_footer)
    ));
    html
}
