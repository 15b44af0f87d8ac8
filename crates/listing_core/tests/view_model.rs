use listing_core::{
    update, Condition, ContactMethod, CurrentUser, FieldEdit, Msg, SourceHandle, Step,
    WizardSession,
};
use pretty_assertions::assert_eq;

fn seller() -> CurrentUser {
    CurrentUser {
        id: "user-9".to_string(),
        name: "Margaret".to_string(),
        email: None,
        university: "Lakeside College".to_string(),
    }
}

fn drive(msgs: Vec<Msg>) -> WizardSession {
    let mut session = WizardSession::new(seller());
    for msg in msgs {
        session = update(session, msg).0;
    }
    session
}

#[test]
fn stepper_tracks_active_and_completed_steps() {
    let session = drive(vec![
        Msg::EditField(FieldEdit::Title("Lab coat".to_string())),
        Msg::EditField(FieldEdit::Price("15".to_string())),
        Msg::EditField(FieldEdit::Description("Size M, worn for one semester".to_string())),
        Msg::Next,
    ]);
    let view = session.view();

    let flags: Vec<(u8, &str, bool, bool)> = view
        .steps
        .iter()
        .map(|s| (s.number, s.label, s.active, s.completed))
        .collect();
    assert_eq!(
        flags,
        vec![
            (1, "Details", false, true),
            (2, "Photos", true, false),
            (3, "Contact", false, false),
            (4, "Review", false, false),
        ]
    );
    assert_eq!(view.primary_action, "Next: Contact");
    assert!(view.can_go_back);
    assert!(view.review.is_none());
}

#[test]
fn first_step_cannot_go_back() {
    let view = drive(Vec::new()).view();
    assert_eq!(view.step, Step::Details);
    assert!(!view.can_go_back);
    assert_eq!(view.primary_action, "Next: Photos");
    assert!(view.error_message.is_none());
}

#[test]
fn review_summary_mirrors_the_draft() {
    let session = drive(vec![
        Msg::EditField(FieldEdit::Title("Lab coat".to_string())),
        Msg::EditField(FieldEdit::Price("15".to_string())),
        Msg::EditField(FieldEdit::Description("Size M, worn for one semester".to_string())),
        Msg::EditField(FieldEdit::Condition(Condition::LikeNew)),
        Msg::Next,
        Msg::AddImages(vec![SourceHandle::from("front.jpg"), SourceHandle::from("back.jpg")]),
        Msg::Next,
        Msg::EditField(FieldEdit::ContactMethod(ContactMethod::Phone)),
        Msg::EditField(FieldEdit::Phone("555-0199".to_string())),
        Msg::Next,
    ]);
    let view = session.view();
    assert_eq!(view.primary_action, "Publish Listing");
    assert_eq!(view.images.len(), 2);
    assert!(view.images[0].is_main);
    assert!(!view.images[1].is_main);

    let review = view.review.expect("review summary");
    assert_eq!(review.price, "$15.00");
    assert_eq!(review.condition, "Like New");
    assert_eq!(review.category, "Textbooks");
    assert_eq!(review.location, "Lakeside College");
    assert_eq!(review.contact, "Phone: 555-0199");
    assert_eq!(review.photo_count, "2 photos");
    assert_eq!(review.main_image.as_deref(), Some("blob:campus-bazar/1"));
    assert_eq!(review.seller_initial, 'M');

    let (session, _) = update(session, Msg::Submit);
    let view = session.view();
    assert!(view.busy);
    assert!(!view.can_go_back);
    assert_eq!(view.primary_action, "Publishing...");
}
