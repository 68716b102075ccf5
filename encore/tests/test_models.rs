use encore::models::{
    Author, ChatMessage, DEVELOPER_ID, DateTime, MUSIC_GENRES, Peer, PeerId, RecommendationMode,
    RequestKind, UserProfile,
};

#[test]
fn test_roster_members() {
    // Act
    let roster = Peer::roster();
    // Assert
    assert_eq!(roster.len(), 4);
    assert!(roster.iter().all(|peer| peer.online));
    assert!(roster.iter().all(|peer| peer.recent_song.is_some()));
    assert_eq!(roster[0].name, "Minsu Kim");
}

#[test]
fn test_resolve_known_peer() {
    // Act
    let peer = Peer::resolve(PeerId::User(1));
    // Assert
    assert_eq!(peer.name, "Minsu Kim");
    assert!(peer.online);
    let song = peer.recent_song.expect("roster members carry a recent song");
    assert_eq!(song.title, "Spring Day");
    assert_eq!(song.artist, "BTS");
}

#[test]
fn test_resolve_developer_aliases() {
    // The reserved numeric id points at the same contact as the enum variant.
    let by_variant = Peer::resolve(PeerId::Developer);
    let by_id = Peer::resolve(PeerId::User(DEVELOPER_ID));
    assert_eq!(by_variant.name, "Developer");
    assert_eq!(by_id.name, "Developer");
}

#[test]
fn test_resolve_unknown_peer() {
    // Act
    let peer = Peer::resolve(PeerId::User(42));
    // Assert
    assert_eq!(peer.name, "User 42");
    assert!(!peer.online);
    assert!(peer.recent_song.is_none());
}

#[test]
fn test_clock_label_format() {
    // Act
    let label = DateTime::now().clock_label();
    // Assert
    assert!(label.contains(':'), "unexpected label: {label}");
    assert!(
        label.ends_with("AM") || label.ends_with("PM"),
        "unexpected label: {label}"
    );
}

#[test]
fn test_chat_message_constructors() {
    // Act
    let first = ChatMessage::outgoing("Hello");
    let second = ChatMessage::new(Author::Assistant, "Hi there");
    // Assert
    assert!(first.author.is_me());
    assert!(!second.author.is_me());
    assert_ne!(first.id, second.id, "ids must be unique");
}

#[test]
fn test_author_labels() {
    assert_eq!(Author::Me.label(), "Me");
    assert_eq!(Author::Peer.label(), "Peer");
    assert_eq!(Author::Assistant.label(), "AI Music Manager");
}

#[test]
fn test_request_kinds() {
    // Act
    let kinds = RequestKind::all();
    // Assert
    assert_eq!(kinds.len(), 4);
    assert_eq!(kinds[0].label(), "Feature request");
    assert_eq!(kinds[3].label(), "Other");
}

#[test]
fn test_recommendation_modes() {
    // Act
    let modes = RecommendationMode::all();
    // Assert
    assert_eq!(modes.len(), 2);
    assert_eq!(RecommendationMode::default(), RecommendationMode::Preference);
    assert!(!modes[0].label().is_empty());
    assert!(!modes[0].description().is_empty());
}

#[test]
fn test_genre_catalog() {
    assert_eq!(MUSIC_GENRES.len(), 20);
    assert!(MUSIC_GENRES.contains(&"Ballad"));
}

#[test]
fn test_genre_summary() {
    // Arrange
    let mut profile = UserProfile::default();
    // Act / Assert
    assert_eq!(profile.genre_summary(), "Ballad, Jazz");
    profile.genres.clear();
    assert_eq!(profile.genre_summary(), "None yet");
}
