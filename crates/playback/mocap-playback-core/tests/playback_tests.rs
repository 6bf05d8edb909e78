use mocap_playback_core::{
    clock::FrameClock,
    data::{JointTrack, MocapClip, Vec3},
    error::PlaybackError,
    player::Player,
    sampling::{sample, sample_into, FrameSnapshot},
    sync::{sync_snapshot, CpuInstanceRegion, InstanceRegion},
};

/// Position encoding joint/frame so reads are attributable to their source.
fn pos(joint: usize, frame: usize) -> Vec3 {
    Vec3::new(joint as f32 * 10.0 + frame as f32, frame as f32, joint as f32)
}

fn mk_track(name: &str, positions: Vec<Vec3>) -> JointTrack {
    JointTrack {
        name: name.to_string(),
        positions,
    }
}

fn mk_clip(joint_count: usize, frame_count: usize) -> MocapClip {
    let joints = (0..joint_count)
        .map(|j| {
            mk_track(
                &format!("joint_{j}"),
                (0..frame_count).map(|f| pos(j, f)).collect(),
            )
        })
        .collect();
    MocapClip::from_joints("clip", joints).expect("builder clips have joints")
}

/// A region whose storage can never be mapped.
struct FailingRegion {
    capacity: usize,
}

impl InstanceRegion for FailingRegion {
    fn instance_capacity(&self) -> usize {
        self.capacity
    }
    fn replace(&mut self, _write: &mut dyn FnMut(&mut [Vec3])) -> Result<(), PlaybackError> {
        Err(PlaybackError::RegionAcquire {
            reason: "mapping refused".to_string(),
        })
    }
}

/// A region that claims more capacity than the window it actually maps.
struct ShortWindowRegion {
    declared: usize,
    storage: Vec<Vec3>,
}

impl InstanceRegion for ShortWindowRegion {
    fn instance_capacity(&self) -> usize {
        self.declared
    }
    fn replace(&mut self, write: &mut dyn FnMut(&mut [Vec3])) -> Result<(), PlaybackError> {
        write(&mut self.storage);
        Ok(())
    }
}

/// it should fail clock construction for an empty animation
#[test]
fn clock_rejects_zero_frames() {
    assert_eq!(FrameClock::new(0), Err(PlaybackError::EmptyAnimation));
    let clock = FrameClock::new(1).expect("one frame is playable");
    assert_eq!(clock.frame(), 0);
}

/// it should wrap from the last frame to 0 without ever presenting frame_count
#[test]
fn clock_wraps_in_the_transition() {
    let mut clock = FrameClock::new(3).expect("clock");
    let mut seen = vec![clock.frame()];
    for _ in 0..7 {
        seen.push(clock.advance());
    }
    assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
    assert!(seen.iter().all(|&f| f < 3));
}

/// it should hold a single-frame clip on frame 0 forever
#[test]
fn clock_single_frame_stays_put() {
    let mut clock = FrameClock::new(1).expect("clock");
    for _ in 0..3 {
        assert_eq!(clock.advance(), 0);
    }
}

/// it should fail clip construction when the joint list is empty
#[test]
fn clip_rejects_no_joints() {
    let err = MocapClip::from_joints("empty", Vec::new()).unwrap_err();
    assert_eq!(err, PlaybackError::EmptyAnimation);
}

/// it should derive the frame count from joint 0
#[test]
fn clip_frame_count_comes_from_first_joint() {
    let clip = mk_clip(4, 9);
    assert_eq!(clip.joint_count(), 4);
    assert_eq!(clip.frame_count(), 9);
}

/// it should sample exactly what the store holds, in joint order
#[test]
fn sampling_matches_store_reads() {
    let clip = mk_clip(5, 3);
    let snapshot = sample(&clip, 1).expect("frame 1 in range");
    assert_eq!(snapshot.frame, 1);
    assert_eq!(snapshot.positions.len(), clip.joint_count());
    for (joint, p) in snapshot.positions.iter().enumerate() {
        assert_eq!(*p, clip.position_at(joint, 1).expect("in range"));
        assert_eq!(*p, pos(joint, 1));
    }
}

/// it should reject sampling at or beyond the frame count with full bounds context
#[test]
fn sampling_out_of_range_frame() {
    let clip = mk_clip(2, 4);
    let err = sample(&clip, 4).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::OutOfRange {
            joint: 0,
            frame: 4,
            joint_count: 2,
            frame_count: 4,
        }
    );
}

/// it should reject reads of joints the clip does not have
#[test]
fn store_out_of_range_joint() {
    let clip = mk_clip(2, 4);
    let err = clip.position_at(2, 0).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::OutOfRange {
            joint: 2,
            frame: 0,
            joint_count: 2,
            frame_count: 4,
        }
    );
}

/// it should surface OutOfRange for a joint shorter than the clip frame count
#[test]
fn sampling_short_joint_fails_loudly() {
    let joints = vec![
        mk_track("full", (0..3).map(|f| pos(0, f)).collect()),
        mk_track("short", vec![pos(1, 0)]),
    ];
    let clip = MocapClip::from_joints("uneven", joints).expect("joints present");
    assert_eq!(clip.frame_count(), 3);

    // Frame 0 exists on both joints.
    assert!(sample(&clip, 0).is_ok());
    // Frame 1 is inside the clip but missing from the short joint.
    let err = sample(&clip, 1).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::OutOfRange {
            joint: 1,
            frame: 1,
            joint_count: 2,
            frame_count: 3,
        }
    );
}

/// it should reuse the snapshot allocation across sample_into calls
#[test]
fn sampling_into_reuses_allocation() {
    let clip = mk_clip(6, 2);
    let mut snapshot = FrameSnapshot::default();
    sample_into(&clip, 0, &mut snapshot).expect("frame 0");
    let capacity = snapshot.positions.capacity();
    sample_into(&clip, 1, &mut snapshot).expect("frame 1");
    assert_eq!(snapshot.positions.capacity(), capacity);
    assert_eq!(snapshot.frame, 1);
    assert_eq!(snapshot.positions[5], pos(5, 1));
}

/// it should refuse to touch a region of the wrong size
#[test]
fn sync_count_mismatch_leaves_region_untouched() {
    let clip = mk_clip(3, 2);
    let snapshot = sample(&clip, 0).expect("frame 0");
    let mut region = CpuInstanceRegion::new(2);

    let err = sync_snapshot(&snapshot, &mut region).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::InstanceCountMismatch {
            expected: 3,
            actual: 2,
        }
    );
    // The mismatch is checked before acquisition: nothing was written.
    assert_eq!(region.generation(), 0);
    assert!(region.positions().iter().all(|&p| p == Vec3::ZERO));
}

/// it should replace the whole region, leaving no stale contents behind
#[test]
fn sync_replaces_region_contents() {
    let clip = mk_clip(3, 2);
    let snapshot = sample(&clip, 1).expect("frame 1");
    let mut region = CpuInstanceRegion::new(3);
    let sentinel = Vec3::new(-999.0, -999.0, -999.0);
    region
        .replace(&mut |window| window.fill(sentinel))
        .expect("cpu regions always map");

    sync_snapshot(&snapshot, &mut region).expect("sizes match");
    assert_eq!(region.generation(), 2);
    assert_eq!(region.positions(), snapshot.positions.as_slice());
    assert!(region.positions().iter().all(|&p| p != sentinel));
}

/// it should fail, not panic, when replace hands over a short window
#[test]
fn sync_rejects_short_replace_window() {
    let clip = mk_clip(3, 1);
    let snapshot = sample(&clip, 0).expect("frame 0");
    let mut region = ShortWindowRegion {
        declared: 3,
        storage: vec![Vec3::ZERO; 2],
    };

    let err = sync_snapshot(&snapshot, &mut region).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::InstanceCountMismatch {
            expected: 3,
            actual: 2,
        }
    );
    // The undersized window was never written.
    assert!(region.storage.iter().all(|&p| p == Vec3::ZERO));
}

/// it should hand the write closure the full capacity window
#[test]
fn region_replace_covers_full_window() {
    let mut region = CpuInstanceRegion::new(5);
    region
        .replace(&mut |window| {
            assert_eq!(window.len(), 5);
            for (i, slot) in window.iter_mut().enumerate() {
                *slot = Vec3::new(i as f32, 0.0, 0.0);
            }
        })
        .expect("cpu regions always map");
    assert_eq!(region.generation(), 1);
    assert_eq!(region.positions()[4], Vec3::new(4.0, 0.0, 0.0));
}

/// it should present frames in tick order and wrap after the last one
#[test]
fn player_presents_frames_in_order() {
    let clip = mk_clip(4, 3);
    let mut player = Player::new(clip).expect("player");
    let mut region = CpuInstanceRegion::new(4);

    let mut presented = Vec::new();
    for _ in 0..7 {
        let report = player.tick(&mut region).expect("tick");
        assert_eq!(report.instances, 4);
        // The region holds exactly the frame the report claims.
        for (joint, p) in region.positions().iter().enumerate() {
            assert_eq!(*p, pos(joint, report.frame));
        }
        presented.push(report.frame);
    }
    assert_eq!(presented, vec![0, 1, 2, 0, 1, 2, 0]);
}

/// it should walk the reference three-joint clip through both frames and wrap
#[test]
fn player_reference_sequence_wraps_exactly() {
    let joints = vec![
        mk_track("a", vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]),
        mk_track("b", vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 0.0)]),
        mk_track("c", vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 2.0)]),
    ];
    let clip = MocapClip::from_joints("reference", joints).expect("three joints");
    let mut player = Player::new(clip).expect("player");
    let mut region = CpuInstanceRegion::new(3);

    let first = player.tick(&mut region).expect("tick 1");
    assert_eq!(first.frame, 0);
    let frame0: Vec<Vec3> = region.positions().to_vec();
    assert_eq!(
        frame0,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]
    );

    let second = player.tick(&mut region).expect("tick 2");
    assert_eq!(second.frame, 1);
    assert_eq!(
        region.positions(),
        &[
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]
    );

    // Tick 3 wraps back to frame 0 and reproduces tick 1's output exactly.
    let third = player.tick(&mut region).expect("tick 3");
    assert_eq!(third.frame, 0);
    assert_eq!(region.positions(), frame0.as_slice());
}

/// it should not advance the clock when the region size does not match
#[test]
fn player_failed_tick_does_not_skip_frames() {
    let clip = mk_clip(3, 2);
    let mut player = Player::new(clip).expect("player");

    let mut wrong = CpuInstanceRegion::new(2);
    let err = player.tick(&mut wrong).unwrap_err();
    assert!(matches!(
        err,
        PlaybackError::InstanceCountMismatch {
            expected: 3,
            actual: 2,
        }
    ));
    assert_eq!(player.current_frame(), 0);
    assert_eq!(wrong.generation(), 0);

    // With a right-sized region the same frame gets presented, not skipped.
    let mut region = CpuInstanceRegion::new(3);
    let report = player.tick(&mut region).expect("tick");
    assert_eq!(report.frame, 0);
    assert_eq!(player.current_frame(), 1);
}

/// it should propagate a host acquisition failure and stay on the same frame
#[test]
fn player_acquire_failure_is_loud_and_resumable() {
    let clip = mk_clip(2, 3);
    let mut player = Player::new(clip).expect("player");

    let mut failing = FailingRegion { capacity: 2 };
    let err = player.tick(&mut failing).unwrap_err();
    assert!(matches!(err, PlaybackError::RegionAcquire { .. }));
    assert_eq!(player.current_frame(), 0);

    let mut region = CpuInstanceRegion::new(2);
    let report = player.tick(&mut region).expect("tick");
    assert_eq!(report.frame, 0);
}

/// it should reject building a player over a clip with no frames
#[test]
fn player_rejects_frameless_clip() {
    let clip = MocapClip::from_joints("hollow", vec![mk_track("only", Vec::new())])
        .expect("joint list is not empty");
    assert_eq!(clip.frame_count(), 0);
    let err = Player::new(clip).unwrap_err();
    assert_eq!(err, PlaybackError::EmptyAnimation);
}

/// it should read and write positions as [x, y, z] triples
#[test]
fn vec3_serde_uses_triples() {
    let track: JointTrack =
        serde_json::from_str(r#"{"name":"hip","positions":[[1.0,2.0,3.0]]}"#).expect("parse");
    assert_eq!(track.positions[0], Vec3::new(1.0, 2.0, 3.0));

    let back = serde_json::to_string(&track.positions[0]).expect("serialize");
    assert_eq!(back, "[1.0,2.0,3.0]");
}
