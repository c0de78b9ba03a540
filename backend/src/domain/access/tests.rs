//! Decision table coverage for `can_access`.

use super::*;
use crate::domain::{ErrorCode, JobDraft, JobId};
use rstest::{fixture, rstest};

use AccessDecision::{Allowed, Denied};
use DenialKind::{Forbidden, NotFound, Unauthenticated};

struct World {
    seeker: Principal,
    recruiter: Principal,
    other_recruiter: Principal,
    admin: Principal,
    job: Job,
    application: Application,
    profile: Profile,
}

#[fixture]
fn world() -> World {
    let seeker = Principal::new(UserId::random(), Role::Seeker);
    let recruiter = Principal::new(UserId::random(), Role::Recruiter);
    let other_recruiter = Principal::new(UserId::random(), Role::Recruiter);
    let admin = Principal::new(UserId::random(), Role::Admin);

    let job = JobDraft::new("Platform Engineer", "", "Remote", Some(120_000))
        .expect("valid draft")
        .into_job(*recruiter.id());
    let application = Application::submit(job.id, *seeker.id(), "Hire me");
    let profile = Profile::empty(*seeker.id());

    World {
        seeker,
        recruiter,
        other_recruiter,
        admin,
        job,
        application,
        profile,
    }
}

fn decide(principal: Option<&Principal>, action: Action, resource: Resource<'_>) -> AccessDecision {
    can_access(AccessPolicy::default(), principal, action, resource)
}

#[rstest]
#[case(Action::Read)]
#[case(Action::List)]
fn jobs_are_public(world: World, #[case] action: Action) {
    for principal in [
        None,
        Some(&world.seeker),
        Some(&world.recruiter),
        Some(&world.admin),
    ] {
        assert_eq!(decide(principal, action, Resource::Job(Some(&world.job))), Allowed);
    }
}

#[rstest]
#[case(Action::Create)]
#[case(Action::Update)]
#[case(Action::Delete)]
fn job_mutations_require_authentication(world: World, #[case] action: Action) {
    assert_eq!(
        decide(None, action, Resource::Job(Some(&world.job))),
        Denied(Unauthenticated)
    );
}

#[rstest]
#[case(Action::Create)]
#[case(Action::Update)]
#[case(Action::Delete)]
fn seekers_cannot_mutate_jobs(world: World, #[case] action: Action) {
    for policy in [JobEditPolicy::OwnerOrAdmin, JobEditPolicy::RoleOnly] {
        let decision = can_access(
            AccessPolicy::new(policy),
            Some(&world.seeker),
            action,
            Resource::Job(Some(&world.job)),
        );
        assert_eq!(decision, Denied(Forbidden), "{policy:?} {action}");
    }
}

#[rstest]
fn recruiters_and_admins_create_jobs(world: World) {
    for principal in [&world.recruiter, &world.admin] {
        assert_eq!(
            decide(Some(principal), Action::Create, Resource::Job(None)),
            Allowed
        );
    }
}

#[rstest]
#[case(Action::Update)]
#[case(Action::Delete)]
fn owner_or_admin_policy_guards_foreign_jobs(world: World, #[case] action: Action) {
    let job = Resource::Job(Some(&world.job));
    assert_eq!(decide(Some(&world.recruiter), action, job), Allowed);
    assert_eq!(decide(Some(&world.admin), action, job), Allowed);
    assert_eq!(
        decide(Some(&world.other_recruiter), action, job),
        Denied(Forbidden)
    );
}

#[rstest]
fn missing_job_reads_are_not_found(world: World) {
    assert_eq!(
        decide(Some(&world.seeker), Action::Read, Resource::Job(None)),
        Denied(NotFound)
    );
    assert_eq!(decide(None, Action::Read, Resource::Job(None)), Denied(NotFound));
}

#[rstest]
#[case(Action::Update)]
#[case(Action::Delete)]
fn missing_job_mutations_check_role_before_existence(world: World, #[case] action: Action) {
    assert_eq!(decide(None, action, Resource::Job(None)), Denied(Unauthenticated));
    assert_eq!(
        decide(Some(&world.seeker), action, Resource::Job(None)),
        Denied(Forbidden)
    );
    assert_eq!(
        decide(Some(&world.recruiter), action, Resource::Job(None)),
        Denied(NotFound)
    );
}

#[rstest]
#[case(Action::Update)]
#[case(Action::Delete)]
fn role_only_policy_lets_any_recruiter_edit(world: World, #[case] action: Action) {
    let decision = can_access(
        AccessPolicy::new(JobEditPolicy::RoleOnly),
        Some(&world.other_recruiter),
        action,
        Resource::Job(Some(&world.job)),
    );
    assert_eq!(decision, Allowed);
}

#[rstest]
#[case(Action::Read)]
#[case(Action::Update)]
#[case(Action::Delete)]
fn applications_are_owner_only_and_masked(world: World, #[case] action: Action) {
    let resource = Resource::Application(Some(&world.application));
    assert_eq!(decide(Some(&world.seeker), action, resource), Allowed);
    assert_eq!(decide(Some(&world.recruiter), action, resource), Denied(NotFound));
    assert_eq!(decide(Some(&world.admin), action, resource), Denied(NotFound));
    assert_eq!(decide(None, action, resource), Denied(Unauthenticated));
}

#[rstest]
fn missing_application_is_not_found(world: World) {
    assert_eq!(
        decide(Some(&world.seeker), Action::Read, Resource::Application(None)),
        Denied(NotFound)
    );
}

#[rstest]
#[case(Action::List)]
#[case(Action::Create)]
fn application_collection_needs_only_authentication(world: World, #[case] action: Action) {
    for principal in [&world.seeker, &world.recruiter, &world.admin] {
        assert_eq!(
            decide(Some(principal), action, Resource::Application(None)),
            Allowed
        );
    }
    assert_eq!(
        decide(None, action, Resource::Application(None)),
        Denied(Unauthenticated)
    );
}

#[rstest]
#[case(Action::Read)]
#[case(Action::Update)]
fn profiles_are_owner_only_and_masked(world: World, #[case] action: Action) {
    let resource = Resource::Profile(Some(&world.profile));
    assert_eq!(decide(Some(&world.seeker), action, resource), Allowed);
    assert_eq!(decide(Some(&world.recruiter), action, resource), Denied(NotFound));
    assert_eq!(decide(Some(&world.admin), action, resource), Denied(NotFound));
}

#[rstest]
fn profiles_cannot_be_deleted(world: World) {
    assert_eq!(
        decide(
            Some(&world.seeker),
            Action::Delete,
            Resource::Profile(Some(&world.profile))
        ),
        Denied(Forbidden)
    );
}

#[rstest]
#[case(Action::List, Allowed)]
#[case(Action::Create, Allowed)]
fn profile_collection_needs_only_authentication(
    world: World,
    #[case] action: Action,
    #[case] expected: AccessDecision,
) {
    assert_eq!(
        decide(Some(&world.recruiter), action, Resource::Profile(None)),
        expected
    );
    assert_eq!(
        decide(None, action, Resource::Profile(None)),
        Denied(Unauthenticated)
    );
}

#[rstest]
#[case(Action::Read, Allowed)]
#[case(Action::List, Allowed)]
#[case(Action::Create, Denied(Forbidden))]
#[case(Action::Update, Denied(Forbidden))]
#[case(Action::Delete, Denied(Forbidden))]
fn user_directory_is_read_only(
    world: World,
    #[case] action: Action,
    #[case] expected: AccessDecision,
) {
    assert_eq!(
        decide(Some(&world.seeker), action, Resource::UserDirectory),
        expected
    );
    assert_eq!(
        decide(None, action, Resource::UserDirectory),
        Denied(Unauthenticated)
    );
}

#[rstest]
fn authorize_maps_denials_to_error_codes(world: World) {
    let policy = AccessPolicy::default();

    let unauthenticated = authorize(policy, None, Action::List, Resource::UserDirectory)
        .expect_err("anonymous directory access");
    assert_eq!(unauthenticated.code(), ErrorCode::Unauthorized);

    let forbidden = authorize(
        policy,
        Some(&world.seeker),
        Action::Create,
        Resource::Job(None),
    )
    .expect_err("seeker job create");
    assert_eq!(forbidden.code(), ErrorCode::Forbidden);

    let masked = authorize(
        policy,
        Some(&world.recruiter),
        Action::Read,
        Resource::Application(Some(&world.application)),
    )
    .expect_err("foreign application");
    assert_eq!(masked.code(), ErrorCode::NotFound);
    assert_eq!(masked.message(), not_found("application").message());
}

#[rstest]
fn authorize_principal_returns_the_caller(world: World) {
    let principal = authorize_principal(
        AccessPolicy::default(),
        Some(&world.seeker),
        Action::List,
        Resource::Application(None),
    )
    .expect("authenticated list");
    assert_eq!(principal, &world.seeker);
}

#[rstest]
fn masked_and_missing_applications_are_indistinguishable(world: World) {
    let policy = AccessPolicy::default();
    let foreign = Application::submit(JobId::random(), *world.recruiter.id(), "");

    let masked = authorize(
        policy,
        Some(&world.seeker),
        Action::Delete,
        Resource::Application(Some(&foreign)),
    )
    .expect_err("foreign application");
    let missing = authorize(
        policy,
        Some(&world.seeker),
        Action::Delete,
        Resource::Application(None),
    )
    .expect_err("missing application");

    assert_eq!(masked, missing);
}

#[rstest]
#[case("owner_or_admin", Ok(JobEditPolicy::OwnerOrAdmin))]
#[case("Role-Only", Ok(JobEditPolicy::RoleOnly))]
#[case("anyone", Err(UnknownJobEditPolicy("anyone".to_owned())))]
fn job_edit_policy_parses(
    #[case] raw: &str,
    #[case] expected: Result<JobEditPolicy, UnknownJobEditPolicy>,
) {
    assert_eq!(raw.parse::<JobEditPolicy>(), expected);
}
