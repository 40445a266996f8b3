use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rewind_history::{ActionIntentTracker, HistoryContext};
use rewind_primitives::{HistoryAction, HistoryChange, HistoryEntry};
use tokio::sync::Semaphore;

use super::*;
use crate::{EntryHandler, Error};

#[derive(Default)]
struct FakeService {
	calls: Mutex<Vec<(Operation, Target)>>,
	fail: Option<Operation>,
	unreachable: bool,
	gate: Option<Semaphore>,
}

impl FakeService {
	fn failing(operation: Operation) -> Self {
		Self {
			fail: Some(operation),
			..Self::default()
		}
	}

	fn unreachable() -> Self {
		Self {
			unreachable: true,
			..Self::default()
		}
	}

	fn gated() -> Self {
		Self {
			gate: Some(Semaphore::new(0)),
			..Self::default()
		}
	}

	fn calls(&self) -> Vec<(Operation, Target)> {
		self.calls.lock().unwrap().clone()
	}

	async fn record(&self, operation: Operation, target: Target) -> Result<()> {
		self.calls.lock().unwrap().push((operation, target));
		if self.unreachable {
			return Err(Error::Unavailable("connection refused".to_string()));
		}
		if let Some(gate) = &self.gate {
			let _permit = gate.acquire().await.unwrap();
		}
		if self.fail == Some(operation) {
			return Err(Error::Rejected {
				operation,
				reason: "conflict".to_string(),
			});
		}
		Ok(())
	}
}

#[async_trait]
impl HistoryService for FakeService {
	async fn undo(&self, quantity: u32) -> Result<()> {
		self.record(Operation::Undo, Target::Quantity(quantity)).await
	}

	async fn redo(&self, quantity: u32) -> Result<()> {
		self.record(Operation::Redo, Target::Quantity(quantity)).await
	}

	async fn undo_by_id(&self, entry_id: &str) -> Result<()> {
		self.record(Operation::UndoById, Target::Entry(entry_id.to_string())).await
	}

	async fn redo_by_id(&self, entry_id: &str) -> Result<()> {
		self.record(Operation::RedoById, Target::Entry(entry_id.to_string())).await
	}

	async fn undo_event_history(&self, quantity: u32) -> Result<()> {
		self.record(Operation::UndoEventHistory, Target::Quantity(quantity)).await
	}

	async fn redo_event_history(&self, quantity: u32) -> Result<()> {
		self.record(Operation::RedoEventHistory, Target::Quantity(quantity)).await
	}

	async fn undo_event_history_by_id(&self, entry_id: &str) -> Result<()> {
		self.record(Operation::UndoEventHistoryById, Target::Entry(entry_id.to_string()))
			.await
	}

	async fn redo_event_history_by_id(&self, entry_id: &str) -> Result<()> {
		self.record(Operation::RedoEventHistoryById, Target::Entry(entry_id.to_string()))
			.await
	}
}

fn ledger() -> Vec<HistoryEntry> {
	vec![
		HistoryEntry::new("E0", "Reject detection", vec![HistoryChange::undoable("c0", "Reject detection").with_event("ev1")]),
		HistoryEntry::new("E1", "Move detection", vec![HistoryChange::undoable("c1", "Move detection").with_event("ev2")]),
		HistoryEntry::new("E2", "Create event", vec![HistoryChange::redoable("c2", "Create event").with_event("ev1")])
			.with_redo_priority(1),
	]
}

fn setup() -> (Arc<FakeService>, HistoryDispatcher, HistoryContext) {
	let service = Arc::new(FakeService::default());
	let dispatcher = HistoryDispatcher::new(service.clone());
	let ctx = HistoryContext::new(ledger()).with_open_event("ev1");
	(service, dispatcher, ctx)
}

#[tokio::test]
async fn plain_click_runs_the_global_handler() {
	let (service, dispatcher, ctx) = setup();
	let handlers = ActionHandlers::by_id(service.clone());
	let entry = &ctx.entries()[2];

	let dispatched = dispatcher.activate_entry(entry, false, None, &handlers).await.unwrap();
	assert_eq!(
		dispatched,
		Some(Dispatched::Handler {
			action: HistoryAction::Redo,
			entry_id: "E2".to_string()
		})
	);
	assert!(!dispatched.unwrap().is_event_scoped());
	assert_eq!(service.calls(), vec![(Operation::RedoById, Target::Entry("E2".to_string()))]);
	assert_eq!(dispatcher.pending(), 0);
}

#[tokio::test]
async fn modifier_click_on_included_entry_is_event_scoped() {
	let (service, dispatcher, ctx) = setup();
	let handlers = ActionHandlers::by_id(service.clone());
	let entry = &ctx.entries()[0];
	let mut tracker = ActionIntentTracker::new();
	tracker.hover_entry(&ctx, entry, true);

	let dispatched = dispatcher
		.activate_entry(entry, true, tracker.current(), &handlers)
		.await
		.unwrap();
	assert_eq!(
		dispatched,
		Some(Dispatched::Service {
			operation: Operation::UndoEventHistoryById,
			target: Target::Entry("E0".to_string())
		})
	);
	assert!(dispatched.unwrap().is_event_scoped());
	// The pointer is read, not consumed.
	assert!(tracker.current().is_some());
}

#[tokio::test]
async fn modifier_click_outside_event_scope_falls_back_to_handler() {
	let (service, dispatcher, ctx) = setup();
	let handlers = ActionHandlers::by_id(service.clone());
	let entry = &ctx.entries()[1];
	let mut tracker = ActionIntentTracker::new();
	tracker.hover_entry(&ctx, entry, true);

	dispatcher
		.activate_entry(entry, true, tracker.current(), &handlers)
		.await
		.unwrap();
	assert_eq!(service.calls(), vec![(Operation::UndoById, Target::Entry("E1".to_string()))]);
}

#[tokio::test]
async fn missing_handler_dispatches_nothing() {
	let (service, dispatcher, ctx) = setup();
	let dispatched = dispatcher
		.activate_entry(&ctx.entries()[0], false, None, &ActionHandlers::new())
		.await
		.unwrap();
	assert_eq!(dispatched, None);
	assert!(service.calls().is_empty());
}

#[tokio::test]
async fn custom_handlers_are_looked_up_by_action_type() {
	struct Recording(Arc<Mutex<Vec<String>>>);

	#[async_trait]
	impl EntryHandler for Recording {
		async fn perform(&self, entry_id: &str) -> Result<()> {
			self.0.lock().unwrap().push(entry_id.to_string());
			Ok(())
		}
	}

	let (service, dispatcher, ctx) = setup();
	let seen = Arc::new(Mutex::new(Vec::new()));
	let handlers = ActionHandlers::new().with(HistoryAction::Undo, Recording(seen.clone()));

	dispatcher.activate_entry(&ctx.entries()[1], false, None, &handlers).await.unwrap();
	let redo = dispatcher.activate_entry(&ctx.entries()[2], false, None, &handlers).await.unwrap();
	assert_eq!(*seen.lock().unwrap(), vec!["E1".to_string()]);
	assert_eq!(redo, None);
	assert!(service.calls().is_empty());
}

#[tokio::test]
async fn buttons_map_to_quantity_calls() {
	let (service, dispatcher, _ctx) = setup();
	let first = dispatcher.activate_button(HistoryAction::Undo, false).await.unwrap();
	dispatcher.activate_button(HistoryAction::Redo, false).await.unwrap();
	dispatcher.activate_button(HistoryAction::Undo, true).await.unwrap();
	let last = dispatcher.activate_button(HistoryAction::Redo, true).await.unwrap();

	assert_eq!(
		last,
		Dispatched::Service {
			operation: Operation::RedoEventHistory,
			target: Target::Quantity(1)
		}
	);
	assert!(!first.is_event_scoped());
	assert!(last.is_event_scoped());
	let operations: Vec<Operation> = service.calls().into_iter().map(|(op, _)| op).collect();
	assert_eq!(
		operations,
		vec![
			Operation::Undo,
			Operation::Redo,
			Operation::UndoEventHistory,
			Operation::RedoEventHistory
		]
	);
}

#[tokio::test]
async fn failure_propagates_and_releases_the_counter() {
	let service = Arc::new(FakeService::failing(Operation::Undo));
	let dispatcher = HistoryDispatcher::new(service.clone());

	let err = dispatcher.undo(3).await.unwrap_err();
	assert_eq!(
		err,
		Error::Rejected {
			operation: Operation::Undo,
			reason: "conflict".to_string()
		}
	);
	assert_eq!(dispatcher.pending(), 0);
	assert_eq!(service.calls(), vec![(Operation::Undo, Target::Quantity(3))]);
}

#[tokio::test]
async fn unreachable_service_surfaces_through_handlers() {
	let service = Arc::new(FakeService::unreachable());
	let dispatcher = HistoryDispatcher::new(service.clone());
	let handlers = ActionHandlers::by_id(service.clone());
	let ctx = HistoryContext::new(ledger());

	let err = dispatcher
		.activate_entry(&ctx.entries()[0], false, None, &handlers)
		.await
		.unwrap_err();
	assert_eq!(err, Error::Unavailable("connection refused".to_string()));
	assert_eq!(err.to_string(), "history service unavailable: connection refused");

	dispatcher.activate_button(HistoryAction::Redo, false).await.unwrap_err();
	assert_eq!(dispatcher.pending(), 0);
	assert_eq!(service.calls().len(), 2);
}

#[tokio::test]
async fn concurrent_global_calls_are_all_counted() {
	let service = Arc::new(FakeService::gated());
	let dispatcher = HistoryDispatcher::new(service.clone());
	let mut pending = dispatcher.subscribe_pending();

	let release = async {
		pending.wait_for(|count| *count == 3).await.unwrap();
		service.gate.as_ref().unwrap().add_permits(3);
	};
	let (first, second, third, ()) =
		tokio::join!(dispatcher.undo(1), dispatcher.undo(1), dispatcher.redo(2), release);

	assert!(first.is_ok() && second.is_ok() && third.is_ok());
	assert_eq!(dispatcher.pending(), 0);
	assert_eq!(service.calls().len(), 3);
}

#[tokio::test]
async fn by_id_calls_do_not_touch_the_counter() {
	let service = Arc::new(FakeService::gated());
	let dispatcher = HistoryDispatcher::new(service.clone());
	let mut pending = dispatcher.subscribe_pending();

	let check = async {
		tokio::task::yield_now().await;
		assert_eq!(*pending.borrow_and_update(), 0);
		service.gate.as_ref().unwrap().add_permits(2);
	};
	let (by_id, event, ()) = tokio::join!(
		dispatcher.undo_by_id("E0"),
		dispatcher.undo_event_history_by_id("E0"),
		check
	);
	assert!(by_id.is_ok() && event.is_ok());
	assert_eq!(dispatcher.pending(), 0);
}

#[tokio::test]
async fn dropped_call_releases_the_counter() {
	let service = Arc::new(FakeService::gated());
	let dispatcher = HistoryDispatcher::new(service.clone());

	let in_flight = dispatcher.undo(1);
	tokio::select! {
		_ = in_flight => panic!("gate was never opened"),
		() = tokio::time::sleep(std::time::Duration::from_millis(10)) => {}
	}
	assert_eq!(dispatcher.pending(), 0);
}
