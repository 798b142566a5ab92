use crate::model::Workflow;

/// The component embedding the canvas.
///
/// The host owns the workflow. The canvas never edits it in place: structural
/// changes arrive as a complete replacement through [`CanvasHost::set_workflow`],
/// followed by [`CanvasHost::dispatch_workflow_changed`] so persistence or undo
/// collaborators can react.
pub trait CanvasHost {
    fn workflow(&self) -> &Workflow;

    /// Replaces the current workflow with `next`.
    fn set_workflow(&mut self, next: Workflow);

    /// Notifies external listeners that a committed change happened.
    fn dispatch_workflow_changed(&mut self) {}

    /// Asks the renderer for a new frame. Called for live gesture updates that
    /// do not touch the workflow.
    fn request_update(&mut self) {}

    /// Opens the configuration panel for a node.
    fn open_node_config(&mut self, _node_id: &str) {}
}

/// A self-contained host that keeps the workflow and counts notifications.
#[derive(Debug, Clone, Default)]
pub struct WorkflowHost {
    pub workflow: Workflow,
    pub commits: usize,
    pub changes: usize,
    pub updates: usize,
    pub opened_config: Option<String>,
}

impl WorkflowHost {
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow,
            ..Self::default()
        }
    }
}

impl CanvasHost for WorkflowHost {
    fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    fn set_workflow(&mut self, next: Workflow) {
        self.workflow = next;
        self.commits += 1;
    }

    fn dispatch_workflow_changed(&mut self) {
        self.changes += 1;
    }

    fn request_update(&mut self) {
        self.updates += 1;
    }

    fn open_node_config(&mut self, node_id: &str) {
        self.opened_config = Some(node_id.to_string());
    }
}
