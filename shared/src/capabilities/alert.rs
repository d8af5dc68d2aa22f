use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::AlertContent;

/// Modal alert. Blocks the user until dismissed but never the core.
#[derive(Clone)]
pub struct Alert<E> {
    context: CapabilityContext<AlertOperation, E>,
}

impl<Ev> Capability<Ev> for Alert<Ev> {
    type Operation = AlertOperation;
    type MappedSelf<MappedEv> = Alert<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Alert::new(self.context.map_event(f))
    }
}

impl<E> Alert<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<AlertOperation, E>) -> Self {
        Self { context }
    }

    pub fn show(&self, title: impl Into<String>, message: impl Into<String>) {
        let context = self.context.clone();
        let operation = AlertOperation::Show {
            title: title.into(),
            message: message.into(),
        };
        self.context.spawn(async move {
            context.notify_shell(operation).await;
        });
    }

    pub fn show_content(&self, content: AlertContent) {
        self.show(content.title, content.message);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertOperation {
    Show { title: String, message: String },
}

impl Operation for AlertOperation {
    type Output = ();
}
