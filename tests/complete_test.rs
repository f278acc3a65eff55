//! Integration tests for completing a message against a scripted API

mod test_utils;

#[cfg(test)]
mod tests {
    use chatmode::chat::{Adapter, ChatError, ModeRegistry, PromptStyle};
    use chatmode::openai::{ApiError, Message, Payload, Role};

    use crate::test_utils::{ScriptedApi, ok, overflow, turns};

    fn assistant_preamble() -> String {
        ModeRegistry::builtin()
            .get("assistant")
            .unwrap()
            .preamble
            .clone()
    }

    fn chat_history(payload: &Payload) -> Vec<(String, String)> {
        let Payload::Chat(messages) = payload else {
            panic!("Expected chat payload");
        };
        // Skip the system entry and the trailing user message
        messages[1..messages.len() - 1]
            .chunks(2)
            .map(|pair| (pair[0].content.clone(), pair[1].content.clone()))
            .collect()
    }

    /// Tests an unknown mode fails before anything is sent
    #[tokio::test]
    async fn it_rejects_unknown_modes_without_a_request() {
        let api = ScriptedApi::new(vec![]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();

        for id in ["", "pirate", "ASSISTANT", "assistant "] {
            let err = adapter.complete("hi", &[], id).await.unwrap_err();
            assert!(matches!(err, ChatError::UnknownMode(ref m) if m == id));
        }
        assert!(api.requests().is_empty());
    }

    /// Tests a request that fits returns the trimmed answer untouched
    #[tokio::test]
    async fn it_completes_without_dropping_turns() {
        let api = ScriptedApi::new(vec![ok("  \n The answer is 42.\n\n ", 57)]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();
        let history = turns(&[("a", "b")]);

        let resp = adapter.complete("question", &history, "assistant").await.unwrap();

        assert_eq!(resp.answer, "The answer is 42.");
        assert_eq!(resp.total_tokens, 57);
        assert_eq!(resp.turns_dropped, 0);
        assert_eq!(api.requests().len(), 1);
    }

    /// Tests the chat payload for the smallest possible conversation
    #[tokio::test]
    async fn it_builds_a_chat_request() {
        let api = ScriptedApi::new(vec![ok("hello", 10)]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();

        adapter.complete("hi", &[], "assistant").await.unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].model, "gpt-3.5-turbo");
        assert_eq!(
            requests[0].payload,
            Payload::Chat(vec![
                Message::new(Role::System, &assistant_preamble()),
                Message::new(Role::User, "hi"),
            ])
        );
    }

    /// Tests the legacy payload ends with the cue for the model
    #[tokio::test]
    async fn it_builds_a_legacy_request() {
        let api = ScriptedApi::new(vec![ok("hello", 10)]);
        let adapter = Adapter::builder(&api, "text-davinci-003")
            .style(PromptStyle::Legacy)
            .build();

        adapter.complete("hi", &[], "assistant").await.unwrap();

        let requests = api.requests();
        let Payload::Legacy(prompt) = &requests[0].payload else {
            panic!("Expected legacy payload");
        };
        assert!(prompt.starts_with(&assistant_preamble()));
        assert!(prompt.ends_with("User: hi\nAssistant: "));
    }

    /// Tests two overflows in a row drop both turns in order
    #[tokio::test]
    async fn it_drops_oldest_turns_on_overflow() {
        let api = ScriptedApi::new(vec![overflow(), overflow(), ok(" done ", 99)]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();
        let history = turns(&[("a", "b"), ("c", "d")]);

        let resp = adapter.complete("e", &history, "assistant").await.unwrap();

        assert_eq!(resp.answer, "done");
        assert_eq!(resp.total_tokens, 99);
        assert_eq!(resp.turns_dropped, 2);

        let requests = api.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            chat_history(&requests[0].payload),
            vec![
                ("a".to_string(), "b".to_string()),
                ("c".to_string(), "d".to_string())
            ]
        );
        assert_eq!(
            chat_history(&requests[1].payload),
            vec![("c".to_string(), "d".to_string())]
        );
        assert!(chat_history(&requests[2].payload).is_empty());

        // The caller's history is left alone
        assert_eq!(history.len(), 2);
    }

    /// Tests every retry removes exactly the oldest remaining turn
    #[tokio::test]
    async fn it_shrinks_history_one_turn_per_retry() {
        let history = turns(&[("1", "1"), ("2", "2"), ("3", "3"), ("4", "4"), ("5", "5")]);

        for k in 0..=history.len() {
            let mut script: Vec<_> = (0..k).map(|_| overflow()).collect();
            script.push(ok("fine", 1));
            let api = ScriptedApi::new(script);
            let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();

            let resp = adapter.complete("next", &history, "assistant").await.unwrap();
            assert_eq!(resp.turns_dropped, k);

            let requests = api.requests();
            assert_eq!(requests.len(), k + 1);
            for (attempt, req) in requests.iter().enumerate() {
                let sent: Vec<String> = chat_history(&req.payload)
                    .into_iter()
                    .map(|(u, _)| u)
                    .collect();
                let expected: Vec<String> =
                    history[attempt..].iter().map(|t| t.user.clone()).collect();
                assert_eq!(sent, expected);
            }
        }
    }

    /// Tests overflow with an empty history is fatal after one attempt
    #[tokio::test]
    async fn it_fails_when_message_alone_overflows() {
        let api = ScriptedApi::new(vec![overflow()]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();

        let err = adapter.complete("huge", &[], "assistant").await.unwrap_err();

        assert!(matches!(err, ChatError::FatalOverflow(ApiError::ContextOverflow(_))));
        assert_eq!(api.requests().len(), 1);
    }

    /// Tests persistent overflow stops after len(history) + 1 attempts
    #[tokio::test]
    async fn it_terminates_on_persistent_overflow() {
        let history = turns(&[("a", "b"), ("c", "d"), ("e", "f")]);
        let api = ScriptedApi::new((0..history.len() + 1).map(|_| overflow()).collect());
        let adapter = Adapter::builder(&api, "text-davinci-003")
            .style(PromptStyle::Legacy)
            .build();

        let err = adapter.complete("g", &history, "assistant").await.unwrap_err();

        assert!(matches!(err, ChatError::FatalOverflow(_)));
        assert_eq!(api.requests().len(), history.len() + 1);

        let Payload::Legacy(last) = &api.requests()[history.len()].payload else {
            panic!("Expected legacy payload");
        };
        assert!(!last.contains("User: a\n"));
        assert!(!last.contains("User: e\n"));
        assert!(last.ends_with("User: g\nAssistant: "));
    }

    /// Tests other API errors are passed through without retrying
    #[tokio::test]
    async fn it_passes_through_other_errors() {
        let api = ScriptedApi::new(vec![Err(ApiError::Status {
            status: 429,
            body: String::from("rate limited"),
        })]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();
        let history = turns(&[("a", "b")]);

        let err = adapter.complete("c", &history, "assistant").await.unwrap_err();

        assert!(matches!(
            err,
            ChatError::Api(ApiError::Status { status: 429, .. })
        ));
        assert_eq!(api.requests().len(), 1);
    }

    /// Tests an overflow followed by another error surfaces that error
    #[tokio::test]
    async fn it_passes_through_errors_after_a_retry() {
        let api = ScriptedApi::new(vec![
            overflow(),
            Err(ApiError::Decode(String::from("missing choices"))),
        ]);
        let adapter = Adapter::builder(&api, "gpt-3.5-turbo").build();
        let history = turns(&[("a", "b"), ("c", "d")]);

        let err = adapter.complete("e", &history, "assistant").await.unwrap_err();

        assert!(matches!(err, ChatError::Api(ApiError::Decode(_))));
        assert_eq!(api.requests().len(), 2);
    }
}
