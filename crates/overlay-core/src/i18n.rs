//! UI string tables, selected by the locale code the host sends with
//! `setVisible`. Templates use `{name}` placeholders.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug)]
pub struct Strings {
    pub code: &'static str,
    pub menu_title: &'static str,
    search_placeholder: &'static str,
    pub exit_button: &'static str,
    pub reset_button: &'static str,
    pub play_tooltip: &'static str,
    pub position_tooltip: &'static str,
    pub favorite_tooltip: &'static str,
    context_header: &'static str,
    quick_emote: &'static str,
    pub empty_slot: &'static str,
    pub context_footer: &'static str,
    pub gizmo_title: &'static str,
    pub rotation: &'static str,
    pub save_button: &'static str,
    pub cancel_button: &'static str,
    pub gizmo_instructions: &'static str,
    /// Sidebar greetings; one is picked each time the menu opens.
    pub welcome_messages: &'static [&'static str],
}

pub static EN: Strings = Strings {
    code: "en",
    menu_title: "Emotes",
    search_placeholder: "Search in {category}...",
    exit_button: "Exit",
    reset_button: "Reset",
    play_tooltip: "Play",
    position_tooltip: "Play with positioning",
    favorite_tooltip: "Favorite",
    context_header: "Bind {label}",
    quick_emote: "Quick emote {slot}",
    empty_slot: "empty",
    context_footer: "Pick a slot to bind this animation",
    gizmo_title: "Positioning",
    rotation: "Rotation",
    save_button: "Save",
    cancel_button: "Cancel",
    gizmo_instructions: "Drag the handles to move. Hold right click to look around.",
    welcome_messages: &[
        "Enjoy the animations!",
        "Pick your favorite animation!",
        "Tune the menu to your liking!",
        "Find the perfect animation!",
        "Add animations to your favorites!",
        "Right-click an animation for more options!",
        "Explore every category!",
        "Search animations quickly and easily!",
    ],
};

pub static FR: Strings = Strings {
    code: "fr",
    menu_title: "Emotes",
    search_placeholder: "Rechercher dans {category}...",
    exit_button: "Quitter",
    reset_button: "Réinitialiser",
    play_tooltip: "Jouer",
    position_tooltip: "Jouer avec positionnement",
    favorite_tooltip: "Favori",
    context_header: "Assigner {label}",
    quick_emote: "Emote rapide {slot}",
    empty_slot: "vide",
    context_footer: "Choisissez un emplacement pour cette animation",
    gizmo_title: "Positionnement",
    rotation: "Rotation",
    save_button: "Enregistrer",
    cancel_button: "Annuler",
    gizmo_instructions: "Faites glisser les poignées. Maintenez le clic droit pour regarder autour.",
    welcome_messages: &[
        "Profitez des animations !",
        "Choisissez votre animation préférée !",
        "Ajoutez des animations à vos favoris !",
        "Clic droit sur une animation pour plus d'options !",
        "Explorez toutes les catégories !",
    ],
};

pub static DE: Strings = Strings {
    code: "de",
    menu_title: "Emotes",
    search_placeholder: "Suche in {category}...",
    exit_button: "Beenden",
    reset_button: "Zurücksetzen",
    play_tooltip: "Abspielen",
    position_tooltip: "Mit Positionierung abspielen",
    favorite_tooltip: "Favorit",
    context_header: "{label} belegen",
    quick_emote: "Schnell-Emote {slot}",
    empty_slot: "leer",
    context_footer: "Wähle einen Platz für diese Animation",
    gizmo_title: "Positionierung",
    rotation: "Drehung",
    save_button: "Speichern",
    cancel_button: "Abbrechen",
    gizmo_instructions: "Ziehe die Griffe. Halte die rechte Maustaste, um dich umzusehen.",
    welcome_messages: &[
        "Viel Spaß mit den Animationen!",
        "Finde deine Lieblingsanimation!",
        "Füge Animationen zu deinen Favoriten hinzu!",
        "Rechtsklick auf eine Animation für mehr Optionen!",
    ],
};

static TABLES: [&Strings; 3] = [&EN, &FR, &DE];

impl Strings {
    /// Table for a locale code such as `fr` or `de-DE`; English otherwise.
    pub fn for_locale(locale: &str) -> &'static Strings {
        let lang = locale
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match TABLES.iter().find(|t| t.code == lang) {
            Some(t) => *t,
            None => {
                log::debug!("[menu] no strings for locale {:?}, using {}", locale, EN.code);
                &EN
            }
        }
    }

    pub fn search_placeholder(&self, category: &str) -> String {
        fill(self.search_placeholder, "category", category)
    }

    pub fn context_header(&self, label: &str) -> String {
        fill(self.context_header, "label", label)
    }

    pub fn quick_emote(&self, slot: u32) -> String {
        fill(self.quick_emote, "slot", &slot.to_string())
    }
}

fn fill(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{}}}", name), value)
}

pub fn pick_welcome<'a, R: Rng + ?Sized>(messages: &[&'a str], rng: &mut R) -> Option<&'a str> {
    messages.choose(rng).copied()
}
