use demixer::domain::{
    Job, JobState, PROGRESS_CLAIMED, PROGRESS_DONE, PROGRESS_ENGINE_READY, StemProfile,
};

#[test]
fn given_new_job_when_created_then_pending_with_zero_progress() {
    let job = Job::new(StemProfile::TwoStems);
    assert_eq!(job.state, JobState::Pending);
    assert_eq!(job.progress, 0);
    assert!(job.outputs.is_empty());
    assert!(job.error_detail.is_none());
}

#[test]
fn given_pending_job_when_started_then_running_at_position_zero() {
    let mut job = Job::new(StemProfile::TwoStems);
    job.queue_position = 3;
    job.start();
    assert_eq!(job.state, JobState::Running);
    assert_eq!(job.progress, PROGRESS_CLAIMED);
    assert_eq!(job.queue_position, 0);
}

#[test]
fn given_running_job_when_completed_then_outputs_recorded_at_full_progress() {
    let mut job = Job::new(StemProfile::TwoStems);
    job.start();
    job.complete(vec!["vocals.wav".to_string(), "accompaniment.wav".to_string()]);
    assert_eq!(job.state, JobState::Complete);
    assert_eq!(job.progress, PROGRESS_DONE);
    assert_eq!(job.outputs.len(), 2);
}

#[test]
fn given_running_job_when_failed_then_detail_recorded() {
    let mut job = Job::new(StemProfile::FourStems);
    job.start();
    job.fail("model blew up");
    assert_eq!(job.state, JobState::Failed);
    assert_eq!(job.error_detail.as_deref(), Some("model blew up"));
}

#[test]
fn given_failed_job_when_mutated_again_then_nothing_changes() {
    let mut job = Job::new(StemProfile::TwoStems);
    job.start();
    job.fail("first failure");
    let progress_at_failure = job.progress;

    job.complete(vec!["vocals.wav".to_string()]);
    job.start();
    job.checkpoint(99);
    job.fail("second failure");

    assert_eq!(job.state, JobState::Failed);
    assert_eq!(job.progress, progress_at_failure);
    assert!(job.outputs.is_empty());
    assert_eq!(job.error_detail.as_deref(), Some("first failure"));
}

#[test]
fn given_completed_job_when_mutated_again_then_nothing_changes() {
    let mut job = Job::new(StemProfile::TwoStems);
    job.start();
    job.complete(vec!["vocals.wav".to_string()]);

    job.fail("late failure");

    assert_eq!(job.state, JobState::Complete);
    assert!(job.error_detail.is_none());
    assert_eq!(job.outputs.len(), 1);
}

#[test]
fn given_progress_checkpoints_when_applied_then_progress_never_regresses() {
    let mut job = Job::new(StemProfile::TwoStems);
    job.start();
    job.checkpoint(PROGRESS_ENGINE_READY);
    job.checkpoint(10);
    assert_eq!(job.progress, PROGRESS_ENGINE_READY);
    job.checkpoint(255);
    assert_eq!(job.progress, PROGRESS_DONE);
}

#[test]
fn given_state_strings_when_round_tripped_then_states_match() {
    for state in [
        JobState::Pending,
        JobState::Running,
        JobState::Complete,
        JobState::Failed,
    ] {
        assert_eq!(state.as_str().parse::<JobState>(), Ok(state));
    }
    assert!("bogus".parse::<JobState>().is_err());
}

#[test]
fn given_terminal_states_when_checked_then_only_complete_and_failed_are_terminal() {
    assert!(!JobState::Pending.is_terminal());
    assert!(!JobState::Running.is_terminal());
    assert!(JobState::Complete.is_terminal());
    assert!(JobState::Failed.is_terminal());
}

#[test]
fn given_supported_params_when_normalizing_then_profiles_match() {
    assert_eq!(StemProfile::from_param("2"), StemProfile::TwoStems);
    assert_eq!(StemProfile::from_param("2stems"), StemProfile::TwoStems);
    assert_eq!(StemProfile::from_param("4"), StemProfile::FourStems);
    assert_eq!(StemProfile::from_param("4stems"), StemProfile::FourStems);
}

#[test]
fn given_five_stem_request_when_normalizing_then_downgraded_to_four() {
    assert_eq!(StemProfile::from_param("5"), StemProfile::FourStems);
    assert_eq!(StemProfile::from_param("5stems"), StemProfile::FourStems);
}

#[test]
fn given_unknown_param_when_normalizing_then_falls_back_to_two_stems() {
    assert_eq!(StemProfile::from_param(""), StemProfile::TwoStems);
    assert_eq!(StemProfile::from_param("11"), StemProfile::TwoStems);
    assert_eq!(StemProfile::from_param("karaoke"), StemProfile::TwoStems);
}

#[test]
fn given_profiles_when_listing_stems_then_names_match_counts() {
    for profile in [StemProfile::TwoStems, StemProfile::FourStems] {
        assert_eq!(profile.stem_names().len(), profile.stem_count());
    }
}
