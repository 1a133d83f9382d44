//! Randomized event streams.

use proptest::prelude::*;

use monoslide::prelude::*;

use crate::helpers::*;

#[derive(Debug, Clone)]
enum Event {
    On(u8, u8),
    Off(u8),
    AllOff,
    Tempo(f32),
    Control(u8),
}

fn event_strategy() -> impl Strategy<Value = (usize, Event)> {
    let event = prop_oneof![
        8 => (48u8..60, 1u8..128).prop_map(|(key, velocity)| Event::On(key, velocity)),
        6 => (48u8..60).prop_map(Event::Off),
        1 => Just(Event::AllOff),
        1 => (30.0f32..300.0).prop_map(Event::Tempo),
        1 => (0u8..120).prop_map(Event::Control),
    ];
    (0..TEST_BUFFER_SIZE, event)
}

fn block_input(mut events: Vec<(usize, Event)>) -> Input {
    events.sort_by_key(|(frame, _)| *frame);
    events
        .into_iter()
        .fold(Input::new(), |input, (frame, event)| match event {
            Event::On(key, velocity) => input.note_on(frame, key, velocity),
            Event::Off(key) => input.note_off(frame, key),
            Event::AllOff => input.control_change(frame, 123, 0),
            Event::Tempo(bpm) => input.tempo(frame, bpm),
            Event::Control(cc) => input.control_change(frame, cc, 64),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Output note-ons and note-offs alternate, each off matching the
    /// preceding on, and the sounding key is always one that was played.
    #[test]
    fn prop_single_sounding_note(
        blocks in prop::collection::vec(prop::collection::vec(event_strategy(), 0..10), 1..12),
        divisor in 1.0f32..256.0,
        semitones in 1u8..13,
    ) {
        let mut slide = test_slide_with(|b| {
            b.beat_divisor(divisor)
                .bend_semitone_distance(semitones as f32)
        });
        let mut output = slide.output_buffer();
        let mut sounding: Option<u8> = None;

        for events in blocks {
            let input = block_input(events);
            let out = run_block(&mut slide, TEST_BUFFER_SIZE, &input, &mut output);
            prop_assert!(!output.overflowed());

            for (index, (_, msg)) in out.iter().enumerate() {
                match msg {
                    Msg::NoteOn { key, .. } => {
                        prop_assert_eq!(sounding, None);
                        sounding = Some(*key);
                    }
                    Msg::NoteOff { key } => {
                        prop_assert_eq!(sounding, Some(*key));
                        sounding = None;
                    }
                    Msg::Bend(value) => {
                        // A starting note's centered bend precedes its note-on
                        let starts_note =
                            matches!(out.get(index + 1), Some((_, Msg::NoteOn { .. })));
                        prop_assert!(sounding.is_some() || starts_note);
                        prop_assert!((-8192..=8191).contains(value));
                    }
                    Msg::Other(_) => {}
                }
            }

            let held: Vec<u8> = slide.held_keys().collect();
            prop_assert_eq!(held.is_empty(), sounding.is_none());
            let mut unique = held.clone();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(unique.len(), held.len());
        }
    }
}
