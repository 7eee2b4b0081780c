//=========================================================================
// Host Activity
//=========================================================================
//
// Forwards activity lifecycle, touch and key callbacks to the bridge.
//
// Ordering contract (relative to the base activity and local resources):
// ```text
//   on_create   base → surface → set_activity(handle) → bridge.on_create
//   on_start    base → bridge          on_stop     bridge → base
//   on_restart  base → bridge          on_destroy  bridge → base → render thread joined
//   on_pause    bridge → surface pause → audio stop → base
//   on_resume   base → audio start → surface resume → bridge
// ```
//
// Teardown signals reach the bridge before the framework reclaims
// anything; resumption signals reach it only after everything is live.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use super::audio::{AudioControl, AudioDevice};
use super::base::{ActivityBase, DefaultActivityBase};
use crate::core::bridge::{ActivityHandle, Bridge};
use crate::core::input::{KeyEvent, PointerSource, TouchAction, TouchError, TouchSample};
use crate::core::render::{RenderSurface, Renderer};
use crate::host::HostConfig;

//=== TouchDispatch =======================================================

/// Which bridge call a touch event produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchDispatch {
    Begin { count: usize, action_id: i32 },
    Move { count: usize },
    End { count: usize, action_id: i32 },
    Cancel { count: usize },

    /// Action not forwarded; no bridge call was made.
    Ignored,
}

//=== HostActivity ========================================================

pub struct HostActivity<B: Bridge> {
    handle: ActivityHandle,
    bridge: Arc<B>,
    base: Box<dyn ActivityBase>,
    audio: Box<dyn AudioControl>,
    surface: Option<RenderSurface<B>>,
    config: HostConfig,
}

impl<B: Bridge> HostActivity<B> {
    //--- Construction -----------------------------------------------------

    /// Creates an activity with the stock base and audio device.
    ///
    /// Nothing is forwarded until [`on_create`](Self::on_create).
    pub fn new(bridge: Arc<B>, config: HostConfig) -> Self {
        Self {
            handle: ActivityHandle::allocate(),
            bridge,
            base: Box::new(DefaultActivityBase::new()),
            audio: Box::new(AudioDevice::new()),
            surface: None,
            config,
        }
    }

    /// Replaces the framework behavior.
    pub fn with_base(mut self, base: impl ActivityBase + 'static) -> Self {
        self.base = Box::new(base);
        self
    }

    /// Replaces the audio resource.
    pub fn with_audio(mut self, audio: impl AudioControl + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn handle(&self) -> ActivityHandle {
        self.handle
    }

    pub fn bridge(&self) -> &Arc<B> {
        &self.bridge
    }

    /// The content surface; `None` before `on_create` and after
    /// `on_destroy`.
    pub fn surface(&self) -> Option<&RenderSurface<B>> {
        self.surface.as_ref()
    }

    pub fn is_audio_running(&self) -> bool {
        self.audio.is_running()
    }

    pub fn is_finishing(&self) -> bool {
        self.base.is_finishing()
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn on_create(&mut self) {
        self.base.on_create();

        let renderer = Renderer::new(Arc::clone(&self.bridge));
        self.surface = Some(RenderSurface::new(
            renderer,
            self.config.render_channel_capacity,
            self.config.frame_interval,
        ));
        debug!(target: "host", "Content surface installed, touch listener registered");

        // The bridge may call back through the handle while handling
        // on_create, so it must already be set.
        self.bridge.set_activity(self.handle);
        self.bridge.on_create();

        info!(target: "host", "Activity {} created", self.handle.id());
    }

    pub fn on_start(&mut self) {
        self.base.on_start();
        self.bridge.on_start();
    }

    pub fn on_restart(&mut self) {
        self.base.on_restart();
        self.bridge.on_restart();
    }

    pub fn on_stop(&mut self) {
        self.bridge.on_stop();
        self.base.on_stop();
    }

    pub fn on_destroy(&mut self) {
        self.bridge.on_destroy();
        self.base.on_destroy();

        if let Some(mut surface) = self.surface.take() {
            surface.shutdown();
        }
        info!(target: "host", "Activity {} destroyed", self.handle.id());
    }

    pub fn on_pause(&mut self) {
        self.bridge.on_pause();
        if let Some(surface) = self.surface.as_mut() {
            surface.on_pause();
        }
        self.audio.stop();
        self.base.on_pause();
    }

    pub fn on_resume(&mut self) {
        self.base.on_resume();
        self.audio.start();
        if let Some(surface) = self.surface.as_mut() {
            surface.on_resume();
        }
        self.bridge.on_resume();
    }

    //--- Touch ------------------------------------------------------------

    /// Forwards a motion event. Always reports the event consumed.
    ///
    /// Events that cannot be forwarded are logged and dropped; see
    /// [`try_on_touch`](Self::try_on_touch).
    pub fn on_touch<P: PointerSource + ?Sized>(&mut self, event: &P) -> bool {
        if let Err(e) = self.try_on_touch(event) {
            error!(target: "host::touch", "Touch event dropped: {}", e);
        }
        true
    }

    /// Forwards a motion event as exactly one bridge call.
    ///
    /// # Errors
    ///
    /// - [`TouchError::TooManyPointers`] if the event exceeds the
    ///   configured pointer maximum.
    /// - [`TouchError::ActionIndexOutOfRange`] if a down/up event names a
    ///   pointer it does not contain.
    ///
    /// No bridge call is made on error.
    pub fn try_on_touch<P: PointerSource + ?Sized>(
        &mut self,
        event: &P,
    ) -> Result<TouchDispatch, TouchError> {
        let touches = TouchSample::capture(event, self.config.max_pointers)?;
        let action = TouchAction::classify(event.action_masked(), event.action_index());
        let count = touches.len();

        trace!(target: "host::touch", "{:?} with {} pointers", action, count);

        let dispatch = match action {
            TouchAction::Down | TouchAction::PointerDown { .. } => {
                let action_id = touches.id_at(action.action_index())?;
                self.bridge.on_touches_begin(&touches, action_id);
                TouchDispatch::Begin { count, action_id }
            }
            TouchAction::Move => {
                self.bridge.on_touches_move(&touches);
                TouchDispatch::Move { count }
            }
            TouchAction::Up | TouchAction::PointerUp { .. } => {
                let action_id = touches.id_at(action.action_index())?;
                self.bridge.on_touches_end(&touches, action_id);
                TouchDispatch::End { count, action_id }
            }
            TouchAction::Cancel => {
                self.bridge.on_touches_cancel(&touches);
                TouchDispatch::Cancel { count }
            }
            TouchAction::Other(code) => {
                trace!(target: "host::touch", "Action {} not forwarded", code);
                TouchDispatch::Ignored
            }
        };

        Ok(dispatch)
    }

    //--- Keys -------------------------------------------------------------

    /// `true` if the bridge consumed the key, else the base's result.
    pub fn on_key_down(&mut self, key_code: i32, event: &KeyEvent) -> bool {
        if self.bridge.on_key_down(key_code, event) {
            trace!(target: "host::key", "Key {} down consumed by bridge", key_code);
            return true;
        }
        self.base.on_key_down(key_code, event)
    }

    /// `true` if the bridge consumed the key, else the base's result.
    pub fn on_key_up(&mut self, key_code: i32, event: &KeyEvent) -> bool {
        if self.bridge.on_key_up(key_code, event) {
            trace!(target: "host::key", "Key {} up consumed by bridge", key_code);
            return true;
        }
        self.base.on_key_up(key_code, event)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bridge::{BridgeCall, RecordingBridge};
    use crate::core::input::{action, keycode, KeyAction, MotionEvent, RawPointer};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::OnceLock;

    //--- Test Helpers -----------------------------------------------------

    /// One observed step, in the order it happened.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Step {
        Bridge(BridgeCall),
        Base(&'static str),
        Audio(&'static str),

        /// The render thread switched to "paused" or "running".
        Surface(&'static str),
    }

    /// Journals render-thread pause transitions as they are noticed by
    /// the other journaling components.
    struct SurfaceWatch {
        journal: Sender<Step>,
        render_paused: OnceLock<Arc<AtomicBool>>,
        last: AtomicBool,
    }

    impl SurfaceWatch {
        fn new(journal: Sender<Step>) -> Arc<Self> {
            Arc::new(Self {
                journal,
                render_paused: OnceLock::new(),
                last: AtomicBool::new(false),
            })
        }

        fn watch<B: Bridge>(&self, activity: &HostActivity<B>) {
            let flag = activity.surface().expect("surface installed").render_paused();
            self.last.store(flag.load(Ordering::Acquire), Ordering::Relaxed);
            let _ = self.render_paused.set(flag);
        }

        fn note(&self) {
            let Some(flag) = self.render_paused.get() else {
                return;
            };
            let paused = flag.load(Ordering::Acquire);
            if self.last.swap(paused, Ordering::Relaxed) != paused {
                let state = if paused { "paused" } else { "running" };
                let _ = self.journal.send(Step::Surface(state));
            }
        }
    }

    struct JournalBridge {
        inner: RecordingBridge<Step>,
        watch: Arc<SurfaceWatch>,
    }

    impl Bridge for JournalBridge {
        fn set_activity(&self, handle: ActivityHandle) {
            self.watch.note();
            self.inner.set_activity(handle);
        }
        fn on_create(&self) {
            self.watch.note();
            self.inner.on_create();
        }
        fn on_start(&self) {
            self.watch.note();
            self.inner.on_start();
        }
        fn on_restart(&self) {
            self.watch.note();
            self.inner.on_restart();
        }
        fn on_stop(&self) {
            self.watch.note();
            self.inner.on_stop();
        }
        fn on_destroy(&self) {
            self.watch.note();
            self.inner.on_destroy();
        }
        fn on_pause(&self) {
            self.watch.note();
            self.inner.on_pause();
        }
        fn on_resume(&self) {
            self.watch.note();
            self.inner.on_resume();
        }
        fn on_touches_begin(&self, touches: &TouchSample, action_id: i32) {
            self.inner.on_touches_begin(touches, action_id);
        }
        fn on_touches_move(&self, touches: &TouchSample) {
            self.inner.on_touches_move(touches);
        }
        fn on_touches_end(&self, touches: &TouchSample, action_id: i32) {
            self.inner.on_touches_end(touches, action_id);
        }
        fn on_touches_cancel(&self, touches: &TouchSample) {
            self.inner.on_touches_cancel(touches);
        }
        fn on_key_down(&self, key_code: i32, event: &KeyEvent) -> bool {
            self.inner.on_key_down(key_code, event)
        }
        fn on_key_up(&self, key_code: i32, event: &KeyEvent) -> bool {
            self.inner.on_key_up(key_code, event)
        }
        fn on_surface_created(&self) {
            self.inner.on_surface_created();
        }
        fn on_surface_changed(&self, width: i32, height: i32) {
            self.inner.on_surface_changed(width, height);
        }
        fn on_draw_frame(&self) {
            self.inner.on_draw_frame();
        }
    }

    impl From<BridgeCall> for Step {
        fn from(call: BridgeCall) -> Self {
            Step::Bridge(call)
        }
    }

    struct JournalBase {
        journal: Sender<Step>,
        watch: Arc<SurfaceWatch>,
        handle_keys: bool,
    }

    impl JournalBase {
        fn log(&self, step: &'static str) {
            self.watch.note();
            let _ = self.journal.send(Step::Base(step));
        }
    }

    impl ActivityBase for JournalBase {
        fn on_create(&mut self) {
            self.log("create");
        }
        fn on_start(&mut self) {
            self.log("start");
        }
        fn on_restart(&mut self) {
            self.log("restart");
        }
        fn on_stop(&mut self) {
            self.log("stop");
        }
        fn on_destroy(&mut self) {
            self.log("destroy");
        }
        fn on_pause(&mut self) {
            self.log("pause");
        }
        fn on_resume(&mut self) {
            self.log("resume");
        }
        fn on_key_down(&mut self, _key_code: i32, _event: &KeyEvent) -> bool {
            self.log("key_down");
            self.handle_keys
        }
        fn on_key_up(&mut self, _key_code: i32, _event: &KeyEvent) -> bool {
            self.log("key_up");
            self.handle_keys
        }
    }

    struct JournalAudio {
        journal: Sender<Step>,
        watch: Arc<SurfaceWatch>,
        running: bool,
    }

    impl AudioControl for JournalAudio {
        fn start(&mut self) {
            self.running = true;
            self.watch.note();
            let _ = self.journal.send(Step::Audio("start"));
        }
        fn stop(&mut self) {
            self.running = false;
            self.watch.note();
            let _ = self.journal.send(Step::Audio("stop"));
        }
        fn is_running(&self) -> bool {
            self.running
        }
    }

    type Journaled = HostActivity<JournalBridge>;

    fn watched(base_handles_keys: bool) -> (Journaled, Receiver<Step>, Arc<SurfaceWatch>) {
        let (tx, rx) = unbounded();
        let watch = SurfaceWatch::new(tx.clone());
        let bridge = Arc::new(JournalBridge {
            inner: RecordingBridge::with_sender(tx.clone()),
            watch: Arc::clone(&watch),
        });
        let activity = HostActivity::new(bridge, HostConfig::default())
            .with_base(JournalBase {
                journal: tx.clone(),
                watch: Arc::clone(&watch),
                handle_keys: base_handles_keys,
            })
            .with_audio(JournalAudio {
                journal: tx,
                watch: Arc::clone(&watch),
                running: false,
            });
        (activity, rx, watch)
    }

    fn journaled(base_handles_keys: bool) -> (Journaled, Receiver<Step>) {
        let (activity, rx, _watch) = watched(base_handles_keys);
        (activity, rx)
    }

    fn recording() -> (HostActivity<RecordingBridge>, Receiver<BridgeCall>) {
        let (bridge, rx) = RecordingBridge::new();
        (HostActivity::new(Arc::new(bridge), HostConfig::default()), rx)
    }

    fn steps(rx: &Receiver<Step>) -> Vec<Step> {
        rx.try_iter().collect()
    }

    fn touch(action: TouchAction, pointers: &[(i32, f32, f32)]) -> MotionEvent {
        MotionEvent::new(
            action,
            pointers.iter().map(|&(id, x, y)| RawPointer::new(id, x, y)).collect(),
        )
    }

    //=====================================================================
    // Lifecycle Ordering
    //=====================================================================

    #[test]
    fn create_sets_handle_before_created_signal() {
        let (mut activity, rx) = journaled(false);
        let handle = activity.handle();

        activity.on_create();

        assert_eq!(
            steps(&rx),
            vec![
                Step::Base("create"),
                Step::Bridge(BridgeCall::SetActivity(handle)),
                Step::Bridge(BridgeCall::Create),
            ]
        );
        assert!(activity.surface().is_some());
    }

    #[test]
    fn start_and_restart_signal_after_base() {
        let (mut activity, rx) = journaled(false);

        activity.on_start();
        activity.on_restart();

        assert_eq!(
            steps(&rx),
            vec![
                Step::Base("start"),
                Step::Bridge(BridgeCall::Start),
                Step::Base("restart"),
                Step::Bridge(BridgeCall::Restart),
            ]
        );
    }

    #[test]
    fn stop_and_destroy_signal_before_base() {
        let (mut activity, rx) = journaled(false);
        activity.on_create();
        let _ = steps(&rx);

        activity.on_stop();
        activity.on_destroy();

        assert_eq!(
            steps(&rx),
            vec![
                Step::Bridge(BridgeCall::Stop),
                Step::Base("stop"),
                Step::Bridge(BridgeCall::Destroy),
                Step::Base("destroy"),
            ]
        );
        assert!(activity.surface().is_none(), "Surface released on destroy");
    }

    #[test]
    fn pause_signals_bridge_first_and_audio_last() {
        let (mut activity, rx, watch) = watched(false);
        activity.on_create();
        activity.on_resume();
        watch.watch(&activity);
        let _ = steps(&rx);

        activity.on_pause();

        assert_eq!(
            steps(&rx),
            vec![
                Step::Bridge(BridgeCall::Pause),
                Step::Surface("paused"),
                Step::Audio("stop"),
                Step::Base("pause"),
            ]
        );
        assert!(activity.surface().is_some_and(|s| s.is_paused()));
        assert!(!activity.is_audio_running());
    }

    #[test]
    fn resume_restores_resources_before_signal() {
        let (mut activity, rx, watch) = watched(false);
        activity.on_create();
        watch.watch(&activity);
        activity.on_pause();
        let _ = steps(&rx);

        activity.on_resume();

        assert_eq!(
            steps(&rx),
            vec![
                Step::Base("resume"),
                Step::Audio("start"),
                Step::Surface("running"),
                Step::Bridge(BridgeCall::Resume),
            ]
        );
        assert!(activity.surface().is_some_and(|s| !s.is_paused()));
        assert!(activity.is_audio_running());
    }

    #[test]
    fn pause_before_create_skips_surface() {
        let (mut activity, rx) = journaled(false);

        activity.on_pause();

        assert_eq!(
            steps(&rx),
            vec![
                Step::Bridge(BridgeCall::Pause),
                Step::Audio("stop"),
                Step::Base("pause"),
            ]
        );
    }

    //=====================================================================
    // Touch
    //=====================================================================

    #[test]
    fn single_down_begins_with_first_id() {
        let (mut activity, rx) = recording();

        let consumed = activity.on_touch(&touch(TouchAction::Down, &[(5, 10.0, 20.0)]));

        assert!(consumed);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![BridgeCall::TouchesBegin {
                touches: TouchSample::from_points([(5, 10, 20)]),
                action_id: 5,
            }]
        );
    }

    #[test]
    fn move_forwards_all_pointers() {
        let (mut activity, rx) = recording();

        let event = touch(TouchAction::Move, &[(5, 11.0, 21.0), (7, 30.0, 40.0)]);
        assert_eq!(activity.try_on_touch(&event), Ok(TouchDispatch::Move { count: 2 }));

        let call = rx.try_recv().unwrap();
        let BridgeCall::TouchesMove { touches } = call else {
            panic!("Expected TouchesMove, got {:?}", call);
        };
        assert_eq!(touches.ids(), &[5, 7]);
        assert_eq!(touches.xs(), &[11, 30]);
        assert_eq!(touches.ys(), &[21, 40]);
    }

    #[test]
    fn pointer_down_uses_action_index() {
        let (mut activity, rx) = recording();

        let event = touch(
            TouchAction::PointerDown { index: 1 },
            &[(5, 0.0, 0.0), (7, 1.0, 1.0)],
        );
        let dispatch = activity.try_on_touch(&event).unwrap();

        assert_eq!(dispatch, TouchDispatch::Begin { count: 2, action_id: 7 });
        assert!(matches!(
            rx.try_recv(),
            Ok(BridgeCall::TouchesBegin { action_id: 7, .. })
        ));
    }

    #[test]
    fn pointer_up_uses_action_index() {
        let (mut activity, _rx) = recording();

        let event = touch(
            TouchAction::PointerUp { index: 2 },
            &[(1, 0.0, 0.0), (2, 0.0, 0.0), (9, 0.0, 0.0)],
        );

        assert_eq!(
            activity.try_on_touch(&event),
            Ok(TouchDispatch::End { count: 3, action_id: 9 })
        );
    }

    #[test]
    fn plain_up_uses_first_pointer() {
        let (mut activity, rx) = recording();

        activity.on_touch(&touch(TouchAction::Up, &[(3, 4.0, 5.0)]));

        assert!(matches!(
            rx.try_recv(),
            Ok(BridgeCall::TouchesEnd { action_id: 3, .. })
        ));
    }

    #[test]
    fn cancel_with_no_pointers_still_dispatches() {
        let (mut activity, rx) = recording();

        activity.on_touch(&touch(TouchAction::Cancel, &[]));

        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![BridgeCall::TouchesCancel {
                touches: TouchSample::default()
            }]
        );
    }

    #[test]
    fn unrecognized_action_is_consumed_without_call() {
        let (mut activity, rx) = recording();

        let event = MotionEvent::from_raw(action::ACTION_HOVER_MOVE, vec![RawPointer::new(0, 1.0, 1.0)]);

        assert_eq!(activity.try_on_touch(&event), Ok(TouchDispatch::Ignored));
        assert!(activity.on_touch(&event));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn overflow_is_rejected_but_consumed() {
        let (bridge, rx) = RecordingBridge::new();
        let config = HostConfig {
            max_pointers: 2,
            ..HostConfig::default()
        };
        let mut activity = HostActivity::new(Arc::new(bridge), config);

        let event = touch(
            TouchAction::Move,
            &[(0, 0.0, 0.0), (1, 0.0, 0.0), (2, 0.0, 0.0)],
        );

        assert_eq!(
            activity.try_on_touch(&event),
            Err(TouchError::TooManyPointers { count: 3, max: 2 })
        );
        assert!(activity.on_touch(&event));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn action_index_past_byte_range_picks_right_pointer() {
        let (bridge, rx) = RecordingBridge::new();
        let config = HostConfig {
            max_pointers: 512,
            ..HostConfig::default()
        };
        let mut activity = HostActivity::new(Arc::new(bridge), config);

        let pointers: Vec<(i32, f32, f32)> = (0..301).map(|i| (1000 + i, 0.0, 0.0)).collect();
        let event = touch(TouchAction::PointerDown { index: 300 }, &pointers);

        assert_eq!(
            activity.try_on_touch(&event),
            Ok(TouchDispatch::Begin { count: 301, action_id: 1300 })
        );
        assert!(matches!(
            rx.try_recv(),
            Ok(BridgeCall::TouchesBegin { action_id: 1300, .. })
        ));
    }

    #[test]
    fn out_of_range_action_index_makes_no_call() {
        let (mut activity, rx) = recording();

        let event = touch(TouchAction::PointerDown { index: 4 }, &[(0, 0.0, 0.0)]);

        assert_eq!(
            activity.try_on_touch(&event),
            Err(TouchError::ActionIndexOutOfRange { index: 4, count: 1 })
        );
        assert!(rx.try_recv().is_err());
    }

    //=====================================================================
    // Keys
    //=====================================================================

    #[test]
    fn consumed_key_skips_base() {
        let (mut activity, rx) = journaled(false);
        activity.bridge().inner.consume_keys(true);

        let event = KeyEvent::new(keycode::KEYCODE_MENU, KeyAction::Down);
        assert!(activity.on_key_down(keycode::KEYCODE_MENU, &event));

        assert_eq!(
            steps(&rx),
            vec![Step::Bridge(BridgeCall::KeyDown {
                key_code: keycode::KEYCODE_MENU,
                event,
            })]
        );
    }

    #[test]
    fn unconsumed_key_delegates_to_base() {
        let (mut activity, rx) = journaled(true);

        let event = KeyEvent::new(keycode::KEYCODE_A, KeyAction::Up);
        assert!(activity.on_key_up(keycode::KEYCODE_A, &event));

        assert_eq!(
            steps(&rx),
            vec![
                Step::Bridge(BridgeCall::KeyUp {
                    key_code: keycode::KEYCODE_A,
                    event,
                }),
                Step::Base("key_up"),
            ]
        );
    }

    #[test]
    fn unconsumed_key_returns_base_result() {
        let (mut activity, _rx) = journaled(false);

        let event = KeyEvent::new(keycode::KEYCODE_A, KeyAction::Down);
        assert!(!activity.on_key_down(keycode::KEYCODE_A, &event));
    }

    #[test]
    fn unconsumed_back_finishes_with_default_base() {
        let (mut activity, _rx) = recording();

        let down = KeyEvent::new(keycode::KEYCODE_BACK, KeyAction::Down);
        let up = KeyEvent::new(keycode::KEYCODE_BACK, KeyAction::Up);
        assert!(activity.on_key_down(keycode::KEYCODE_BACK, &down));
        assert!(activity.on_key_up(keycode::KEYCODE_BACK, &up));

        assert!(activity.is_finishing());
    }
}
