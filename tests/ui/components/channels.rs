use chatdeck::constants::THEME_CHANNELS;
use chatdeck::theme::{ComponentTheme, Theme};
use chatdeck::ui::components::{Channels, Composer, Header, Messages};
use chatdeck::ui::core::{Atom, Dimension, ManagerRef, Topic};

use crate::support::{counter, initialized_dashboard};

fn geometry(atom: &dyn Atom) -> (Dimension, Dimension) {
    atom.core().with_widget(|widget| {
        let layout = widget.layout();
        (layout.width, layout.left)
    })
}

#[tokio::test]
async fn test_channel_list_makes_room() {
    let manager = initialized_dashboard().await;
    let channels = manager.require::<Channels>().unwrap();
    let composer = manager.require::<Composer>().unwrap();
    let header = manager.require::<Header>().unwrap();
    let messages = manager.require::<Messages>().unwrap();
    assert!(!channels.is_visible());

    channels.show().unwrap();
    let shrunk = (Dimension::relative(75, 2), Dimension::percent(25));
    assert_eq!(geometry(composer.as_ref()), shrunk);
    assert_eq!(geometry(header.as_ref()), shrunk);
    assert_eq!(geometry(messages.as_ref()), shrunk);

    channels.hide().unwrap();
    let expanded = (Dimension::percent(100), Dimension::percent(0));
    assert_eq!(geometry(composer.as_ref()), expanded);
    assert_eq!(geometry(header.as_ref()), expanded);
    assert_eq!(geometry(messages.as_ref()), expanded);
}

#[tokio::test]
async fn test_set_channels_renders_once() {
    let manager = initialized_dashboard().await;
    let channels = manager.require::<Channels>().unwrap();
    let renders = counter(channels.events(), Topic::Render);

    channels
        .set_channels(&["general", "Off Topic", "announcements-and-release-notes"], Some("general"))
        .unwrap();

    assert_eq!(renders.get(), 1);
    assert_eq!(
        channels.labels(),
        vec!["#general", "#?ff?opic", "#announcements-and-rel ..."]
    );
    assert_eq!(channels.active().as_deref(), Some("general"));
    assert_eq!(channels.core().with_widget(|widget| widget.child_count()), 3);
}

#[tokio::test]
async fn test_theme_change_restyles_list() {
    let manager = initialized_dashboard().await;
    let channels = manager.require::<Channels>().unwrap();
    channels.set_channels(&["general"], None).unwrap();
    let renders = counter(channels.events(), Topic::Render);

    let mut theme = Theme::default();
    theme.name = "night".to_string();
    theme.components.insert(
        THEME_CHANNELS.to_string(),
        ComponentTheme::new("#cdd6f4", "#1e1e2e").with_hover("black", "white"),
    );
    let expected = theme.style_for(THEME_CHANNELS);
    manager.apply_theme(theme);

    assert_eq!(channels.core().with_widget(|widget| widget.style()), expected);
    assert_eq!(renders.get(), 1);
}

#[test]
fn test_channels_require_attachment() {
    let channels = Channels::new(ManagerRef::detached());
    assert!(channels.set_channels(&["general"], None).unwrap_err().is_invalid_state());
}
