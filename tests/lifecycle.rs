use atmos::{
    entity::Transform,
    scheduler::{DisplaySink, Frame, FrameScheduler},
    theme::{ThemeMode, ThemeStore},
    window::Viewport,
    SceneAssembler, SkinId,
};

/// Records what reached the display and when.
#[derive(Debug, Default)]
struct RecordingSink {
    presented: Vec<f32>,
    released: usize,
    transforms: Vec<Vec<Transform>>,
}

impl DisplaySink for RecordingSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.presented.push(frame.tick.elapsed);
        self.transforms.push(
            frame
                .scene
                .entities()
                .iter()
                .map(|entity| *entity.transform())
                .collect(),
        );
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

fn scheduler(store: &mut ThemeStore, seed: u64) -> FrameScheduler<RecordingSink> {
    FrameScheduler::new(
        SceneAssembler::new(Viewport::new(1280, 720)).seed(seed),
        store.subscribe(),
        RecordingSink::default(),
    )
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn nothing_is_presented_after_unmount() {
    let mut store = ThemeStore::default();
    let mut scheduler = scheduler(&mut store, 5);
    let token = scheduler.mount(SkinId::Aurora).unwrap();

    for _ in 0..10 {
        assert!(scheduler.tick(token, 1. / 60.));
    }
    assert!(scheduler.unmount());
    let presented = scheduler.sink().presented.len();

    assert!(scheduler.active().is_none());
    assert!(scheduler.scene().is_none());
    assert_eq!(scheduler.sink().presented.len(), presented);
    assert_eq!(presented, 10);
}

#[test]
fn unmount_twice_releases_once_and_stays_unmounted() {
    let mut store = ThemeStore::default();
    let mut scheduler = scheduler(&mut store, 5);
    scheduler.mount(SkinId::Organic).unwrap();

    assert!(scheduler.unmount());
    assert!(!scheduler.unmount());
    assert_eq!(scheduler.sink().released, 1);
    assert!(scheduler.active().is_none());
    assert!(scheduler.stats().is_none());
}

#[test]
fn motion_is_independent_of_the_frame_rate() {
    for skin in SkinId::ALL {
        let mut store = ThemeStore::default();

        let mut at_60 = scheduler(&mut store, 21);
        let token = at_60.mount(skin).unwrap();
        for _ in 0..120 {
            at_60.tick(token, 1. / 60.);
        }

        let mut at_30 = scheduler(&mut store, 21);
        let token = at_30.mount(skin).unwrap();
        for _ in 0..60 {
            at_30.tick(token, 1. / 30.);
        }

        let fast = at_60.scene().unwrap();
        let slow = at_30.scene().unwrap();
        assert!(close(
            at_60.stats().unwrap().elapsed,
            at_30.stats().unwrap().elapsed
        ));
        for (a, b) in fast.entities().iter().zip(slow.entities()) {
            let (a, b) = (a.transform(), b.transform());
            assert!(
                (a.rotation - b.rotation).abs().max_element() < 1e-3,
                "{} {}: {:?} vs {:?}",
                skin,
                fast.skin(),
                a.rotation,
                b.rotation
            );
            assert!((a.position - b.position).abs().max_element() < 1e-3);
        }

        let (a, b) = (fast.particles(), slow.particles());
        if let (Some(a), Some(b)) = (a, b) {
            assert!((a.rotation() - b.rotation()).abs().max_element() < 1e-4);
        }
    }
}

#[test]
fn replaying_the_same_ticks_reproduces_every_transform() {
    let deltas = [0.016, 0.017, 0.05, 0.001, 0.033, 0.016];

    let run = || {
        let mut store = ThemeStore::default();
        let mut scheduler = scheduler(&mut store, 77);
        let token = scheduler.mount(SkinId::Prism).unwrap();
        for delta in deltas {
            scheduler.tick(token, delta);
        }
        scheduler.sink().transforms.clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn invalid_deltas_keep_the_last_good_pose() {
    let mut store = ThemeStore::default();
    let mut scheduler = scheduler(&mut store, 9);
    let token = scheduler.mount(SkinId::Glass).unwrap();

    scheduler.tick(token, 0.5);
    let before = scheduler.sink().transforms.last().cloned().unwrap();

    scheduler.tick(token, f32::NAN);
    scheduler.tick(token, -1.);
    scheduler.tick(token, f32::INFINITY);

    let sink = scheduler.sink();
    assert_eq!(sink.transforms.last().unwrap(), &before);
    assert!(sink.presented.iter().all(|t| t.is_finite()));
    for transforms in &sink.transforms {
        assert!(transforms.iter().all(Transform::is_finite));
    }
    assert_eq!(scheduler.stats().unwrap().glitches, 3);
}

#[test]
fn theme_switch_changes_only_colours() {
    let mut store = ThemeStore::new(ThemeMode::Light);
    let mut scheduler = scheduler(&mut store, 13);
    let token = scheduler.mount(SkinId::Aurora).unwrap();
    scheduler.tick(token, 1.);
    let before = scheduler.scene().unwrap().clone();

    store.set_mode(ThemeMode::Dark);
    // A zero delta leaves every animator where it was.
    scheduler.tick(token, 0.);
    let after = scheduler.scene().unwrap();

    assert_eq!(after.mode(), ThemeMode::Dark);
    assert_ne!(after.background(), before.background());
    for (a, b) in after.entities().iter().zip(before.entities()) {
        assert_eq!(a.transform(), b.transform());
        assert_eq!(a.shape(), b.shape());
        assert_ne!(a.material().color, b.material().color, "{}", a.name());
    }
    assert_eq!(
        after.particles().unwrap().positions(),
        before.particles().unwrap().positions()
    );
}

#[test]
fn each_mount_starts_from_zero() {
    let mut store = ThemeStore::default();
    let mut scheduler = scheduler(&mut store, 3);

    let first = scheduler.mount(SkinId::Brutalist).unwrap();
    scheduler.tick(first, 2.);
    let second = scheduler.mount(SkinId::Brutalist).unwrap();
    scheduler.tick(second, 0.25);

    assert!(second.generation() > first.generation());
    assert_eq!(scheduler.sink().presented, vec![2., 0.25]);
    assert_eq!(scheduler.sink().released, 1);
}
