// Host-side tests for the message shapes exchanged with the game client
// and the keybind menu built from its replies.

use glam::Vec2;
use overlay_core::constants::{MAX_OFFSET, MIN_GIZMO_SCALE, SEARCH_DEBOUNCE_MS, SYNC_QUIET_WINDOW_MS};
use overlay_core::{
    menu_position, parse_response, scale_for_distance, slots_from_response, ContextMenu,
    HostCommand, HostEvent,
};
use serde_json::json;

#[test]
fn menu_messages_decode() {
    assert_eq!(
        HostEvent::parse(r#"{"action":"setVisible","status":true,"locale":"fr"}"#).unwrap(),
        HostEvent::SetVisible {
            status: true,
            locale: Some("fr".into())
        }
    );
    assert_eq!(
        HostEvent::parse(r#"{"action":"show","status":false}"#).unwrap(),
        HostEvent::SetVisible {
            status: false,
            locale: None
        }
    );
    assert_eq!(
        HostEvent::parse(r#"{"action":"resetSettings"}"#).unwrap(),
        HostEvent::ResetSettings
    );
}

#[test]
fn load_emotes_tolerates_missing_lists() {
    let raw = json!({
        "action": "loadEmotes",
        "all": [{"name": "dance", "label": "Dance", "category": "Dances", "canPosition": true}],
        "categories": {"Dances": [{"name": "dance", "label": "Dance", "category": "Dances"}]}
    });
    match HostEvent::from_value(raw).unwrap() {
        HostEvent::LoadEmotes { all, categories } => {
            assert_eq!(all.len(), 1);
            assert!(all[0].can_position);
            assert_eq!(categories["Dances"].len(), 1);
        }
        other => panic!("unexpected {:?}", other),
    }

    match HostEvent::parse(r#"{"action":"loadEmotes"}"#).unwrap() {
        HostEvent::LoadEmotes { all, categories } => {
            assert!(all.is_empty());
            assert!(categories.is_empty());
        }
        other => panic!("unexpected {:?}", other),
    }
}

fn load_emotes(raw: &str) -> (usize, usize) {
    match HostEvent::parse(raw).unwrap() {
        HostEvent::LoadEmotes { all, categories } => (all.len(), categories.len()),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn load_emotes_accepts_lua_empty_tables() {
    assert_eq!(load_emotes(r#"{"action":"loadEmotes","all":null,"categories":{}}"#), (0, 0));
    assert_eq!(load_emotes(r#"{"action":"loadEmotes","all":[],"categories":[]}"#), (0, 0));
    assert_eq!(load_emotes(r#"{"action":"loadEmotes","all":{},"categories":null}"#), (0, 0));
    assert_eq!(
        load_emotes(
            r#"{"action":"loadEmotes","all":[{"name":"sit"}],"categories":{"Emotes":[{"name":"sit"}]}}"#
        ),
        (1, 1)
    );
}

#[test]
fn load_emotes_rejects_filled_tables_of_the_wrong_shape() {
    assert!(HostEvent::parse(r#"{"action":"loadEmotes","categories":[[{"name":"sit"}]]}"#).is_err());
    assert!(HostEvent::parse(r#"{"action":"loadEmotes","all":{"1":{"name":"sit"}}}"#).is_err());
}

#[test]
fn projection_tick_fields_are_optional() {
    match HostEvent::parse(r#"{"action":"updateGizmoProjection","onScreen":false}"#).unwrap() {
        HostEvent::GizmoProjection(tick) => {
            assert_eq!(tick.on_screen, Some(false));
            assert_eq!(tick.screen_x, None);
            assert_eq!(tick.cam_dist, None);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn malformed_messages_are_errors_not_panics() {
    assert!(HostEvent::parse("not json").is_err());
    assert!(HostEvent::parse(r#"{"action":"showGizmo"}"#).is_err());
    assert!(HostEvent::parse(r#"{"status":true}"#).is_err());
}

#[test]
fn outbound_commands_use_host_action_names() {
    let play = HostCommand::PlayEmote {
        name: "dance".into(),
        category: "Dances".into(),
    };
    assert_eq!(play.action(), "playEmote");
    assert_eq!(play.payload(), json!({"name": "dance", "category": "Dances"}));

    let positioned = HostCommand::PlayEmoteWithPositioning {
        name: "sit".into(),
        category: "Emotes".into(),
    };
    assert_eq!(positioned.action(), "playEmoteWithPositioning");

    assert_eq!(HostCommand::Close.action(), "close");
    assert_eq!(HostCommand::GetKeybinds.action(), "getKeybinds");
    assert_eq!(
        HostCommand::SetCameraControl { status: true }.payload(),
        json!({"status": true})
    );
}

#[test]
fn keybind_flow_from_reply_to_command() {
    let reply = parse_response(r#"[{"emote":"wave"},{"emote":null},{}]"#).unwrap();
    let menu = ContextMenu::new("dance", "Dance", slots_from_response(&reply), Vec2::ZERO);
    assert_eq!(menu.slots.len(), 3);

    let bind = menu.bind(3).unwrap();
    assert_eq!(bind.action(), "bindEmote");
    assert_eq!(bind.payload(), json!({"key": 3, "emote": "dance"}));

    let delete = menu.delete(1).unwrap();
    assert_eq!(delete.payload(), json!({"key": 1}));
    assert!(menu.delete(2).is_none());

    // empty reply body: no slots to show
    let empty = parse_response("").unwrap();
    assert!(slots_from_response(&empty).is_empty());
}

#[test]
fn context_menu_accounts_for_parent_offset() {
    let p = menu_position(
        Vec2::new(400.0, 300.0),
        Vec2::new(200.0, 150.0),
        Vec2::new(1280.0, 720.0),
        Vec2::new(100.0, 50.0),
    );
    assert_eq!(p, Vec2::new(300.0, 250.0));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MAX_OFFSET > 0.0);
    assert!(SYNC_QUIET_WINDOW_MS < SEARCH_DEBOUNCE_MS);
    assert_eq!(scale_for_distance(0.0), 1.0);
    assert_eq!(scale_for_distance(100.0), MIN_GIZMO_SCALE);
}
