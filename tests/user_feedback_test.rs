use book_search::application::{SearchSession, UserFeedback};

#[test]
fn test_book_saved_message() {
    let message = UserFeedback::book_saved("Dune");
    assert_eq!(message, "✅ Saved: Dune");
}

#[test]
fn test_already_saved_message() {
    let message = UserFeedback::already_saved("Dune");
    assert_eq!(message, "📚 Dune is already in your saved books.");
}

#[test]
fn test_login_required_message() {
    let message = UserFeedback::login_required();
    assert_eq!(message, "🔴 You need to be logged in to do that.");
}

#[test]
fn test_unknown_book_message() {
    let message = UserFeedback::unknown_book("b1");
    assert_eq!(message, "❌ Book b1 is not in the current results.");
}

#[test]
fn test_book_removed_message() {
    let message = UserFeedback::book_removed("b1");
    assert_eq!(message, "✅ Removed book b1");
}

#[test]
fn test_profile_summary_message() {
    let message = UserFeedback::profile_summary("alice", 3);
    assert_eq!(message, "📚 alice has 3 saved book(s).");
}

#[test]
fn test_save_labels_are_stable() {
    // The shell prints these labels verbatim next to each result.
    assert_eq!(SearchSession::LABEL_SAVE, "Save this Book!");
    assert_eq!(
        SearchSession::LABEL_ALREADY_SAVED,
        "This book has already been saved!"
    );
}

#[test]
fn test_feedback_message_emojis() {
    // Test that all feedback messages include appropriate emojis
    assert!(UserFeedback::book_saved("t").contains("✅"));
    assert!(UserFeedback::already_saved("t").contains("📚"));
    assert!(UserFeedback::login_required().contains("🔴"));
    assert!(UserFeedback::unknown_book("b1").contains("❌"));
    assert!(UserFeedback::book_removed("b1").contains("✅"));
    assert!(UserFeedback::profile_summary("u", 0).contains("📚"));
}

#[test]
fn test_feedback_message_consistency() {
    // Test that all messages follow consistent formatting
    let saved = UserFeedback::book_saved("Dune");
    let removed = UserFeedback::book_removed("b1");
    let unknown = UserFeedback::unknown_book("b1");

    // Success messages should be positive
    assert!(saved.starts_with("✅"));
    assert!(removed.starts_with("✅"));

    // Error messages should be clear
    assert!(unknown.starts_with("❌"));
    assert!(UserFeedback::login_required().starts_with("🔴"));
}
