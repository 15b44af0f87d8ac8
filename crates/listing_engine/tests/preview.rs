use listing_core::{ImageAttachmentManager, SourceHandle};
use listing_engine::{PreviewError, PreviewRegistry};

#[test]
fn registry_tracks_manager_handles() {
    let mut manager = ImageAttachmentManager::new();
    let mut registry = PreviewRegistry::new();

    let added: Vec<_> = manager
        .add_images(vec![SourceHandle::from("desk.jpg"), SourceHandle::from("lamp.jpg")])
        .unwrap()
        .to_vec();
    for attachment in &added {
        registry
            .acquire(attachment.preview(), attachment.source())
            .unwrap();
    }
    assert_eq!(registry.live_count(), manager.len());
    assert_eq!(
        registry.resolve(added[1].preview().uri()).map(SourceHandle::as_str),
        Some("lamp.jpg")
    );

    let removed = manager.remove_image(0).unwrap();
    registry.release(&removed).unwrap();
    assert_eq!(registry.live_count(), manager.len());
    assert!(registry.resolve(removed.uri()).is_none());

    for handle in manager.dispose_all() {
        registry.release(&handle).unwrap();
    }
    assert_eq!(registry.live_count(), 0);
    assert_eq!(registry.released_count(), 2);
}

#[test]
fn double_release_and_double_acquire_are_reported() {
    let mut manager = ImageAttachmentManager::new();
    let mut registry = PreviewRegistry::new();
    let attachment = manager
        .add_images(vec![SourceHandle::from("a.jpg")])
        .unwrap()[0]
        .clone();

    registry
        .acquire(attachment.preview(), attachment.source())
        .unwrap();
    assert_eq!(
        registry.acquire(attachment.preview(), attachment.source()),
        Err(PreviewError::AlreadyLive(attachment.preview().id()))
    );

    registry.release(attachment.preview()).unwrap();
    assert_eq!(
        registry.release(attachment.preview()),
        Err(PreviewError::UnknownHandle(attachment.preview().id()))
    );
    assert_eq!(registry.released_count(), 1);
}
