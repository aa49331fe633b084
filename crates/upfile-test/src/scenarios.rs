//! End-to-end upload scenarios over emulated uploads.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use strum::IntoEnumIterator;
use upfile_core::prelude::*;

use crate::{EmulatedUploads, UploadFixture};

fn file_hash(path: &Path) -> String {
    hex::encode(Sha256::digest(fs::read(path).unwrap()))
}

/// Readable modes that neither truncate nor need the file to be absent.
fn readable_modes() -> impl Iterator<Item = AccessMode> {
    AccessMode::iter().filter(|mode| mode.is_readable() && !mode.truncates())
}

fn writable_only_modes() -> impl Iterator<Item = AccessMode> {
    AccessMode::iter().filter(|mode| !mode.is_readable())
}

#[test]
fn test_stream_matches_backing_file() {
    let mut fixture = UploadFixture::new().unwrap();

    for mode in readable_modes() {
        let generated = fixture.generate().unwrap();
        let expected = file_hash(&generated.tmp_path);
        let stream = fixture.open(&generated, mode).unwrap();
        let upload = UploadedFile::new(stream, generated.metadata(), &fixture.context()).unwrap();

        let stream = upload.stream().unwrap();
        assert_eq!(stream.uri(), Some(generated.tmp_path.as_path()), "mode {mode}");
        assert_eq!(file_hash(stream.uri().unwrap()), expected);
        assert_eq!(upload.size(), Some(generated.size));
        assert_eq!(upload.client_filename(), Some(generated.client_filename.as_str()));
        assert_eq!(
            upload.client_media_type(),
            Some(generated.client_media_type.as_str())
        );
    }
}

#[test]
fn test_construction_rejects_invalid_streams() {
    let mut fixture = UploadFixture::new().unwrap();
    let context = fixture.context();

    for mode in writable_only_modes() {
        let generated = fixture.generate().unwrap();
        let stream = fixture.open(&generated, mode).unwrap();
        let err = UploadedFile::new(stream, UploadMetadata::new(), &context).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstructionInvalid, "mode {mode}");
    }

    for mode in readable_modes() {
        let path = fixture.plain_file().unwrap();
        let stream = FileStream::open(&path, mode).unwrap();
        let err = UploadedFile::new(stream, UploadMetadata::new(), &context).unwrap_err();
        assert!(matches!(
            err,
            UploadError::InvalidUpload(StreamError::NotAnUpload { .. })
        ));
    }

    let generated = fixture.generate().unwrap();
    let stream = fixture.open(&generated, AccessMode::Read).unwrap();
    fs::remove_file(&generated.tmp_path).unwrap();
    let err = UploadedFile::new(stream, UploadMetadata::new(), &context).unwrap_err();
    assert!(matches!(
        err,
        UploadError::InvalidUpload(StreamError::FileMissing { .. })
    ));
}

#[test]
fn test_move_preserves_content() {
    let mut fixture = UploadFixture::new().unwrap();

    for mode in readable_modes() {
        let generated = fixture.generate().unwrap();
        let old_hash = file_hash(&generated.tmp_path);
        let stream = fixture.open(&generated, mode).unwrap();
        let mut upload =
            UploadedFile::new(stream, UploadMetadata::new(), &fixture.context()).unwrap();

        let target = fixture.target_path();
        upload.move_to(&target).unwrap();

        assert!(!generated.tmp_path.exists(), "mode {mode}");
        assert!(target.exists());
        assert_eq!(file_hash(&target), old_hash);
    }
}

#[test]
fn test_move_replaces_existing_target() {
    let mut fixture = UploadFixture::new().unwrap();
    let generated = fixture.generate().unwrap();
    let old_hash = file_hash(&generated.tmp_path);
    let target = fixture.plain_file().unwrap();

    let stream = fixture.open(&generated, AccessMode::Read).unwrap();
    let mut upload = UploadedFile::new(stream, UploadMetadata::new(), &fixture.context()).unwrap();
    upload.move_to(&target).unwrap();

    assert_eq!(file_hash(&target), old_hash);
}

#[test]
fn test_second_move_and_stream_fail() {
    let mut fixture = UploadFixture::new().unwrap();
    let generated = fixture.generate().unwrap();
    let stream = fixture.open(&generated, AccessMode::ReadWrite).unwrap();
    let mut upload = UploadedFile::new(stream, UploadMetadata::new(), &fixture.context()).unwrap();

    let target = fixture.target_path();
    upload.move_to(&target).unwrap();

    let err = upload.move_to(fixture.target_path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyMoved);

    let err = upload.move_to(&target).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyMoved);

    let err = upload.stream().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StreamUnavailable);
    assert!(err.is_already_moved());
    assert!(target.exists());
}

#[test]
fn test_failed_uploads_never_move() {
    let mut fixture = UploadFixture::new().unwrap();

    for code in UploadErrorCode::iter().filter(|code| !code.is_ok()) {
        let generated = fixture.generate().unwrap();
        let old_hash = file_hash(&generated.tmp_path);
        let stream = fixture.open(&generated, AccessMode::Read).unwrap();
        let mut upload = UploadedFile::new(
            stream,
            generated.metadata().with_error(code),
            &fixture.context(),
        )
        .unwrap();

        let target = fixture.target_path();
        let err = upload.move_to(&target).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CannotMove, "code {code}");
        assert!(err.to_string().contains(code.message()));
        assert_eq!(upload.error(), code.to_native_code());
        assert_eq!(file_hash(&generated.tmp_path), old_hash);
        assert!(!target.exists());
    }
}

#[test]
fn test_invalid_targets_leave_source_in_place() {
    let mut fixture = UploadFixture::new().unwrap();

    for mode in readable_modes() {
        let generated = fixture.generate().unwrap();
        let stream = fixture.open(&generated, mode).unwrap();
        let mut upload =
            UploadedFile::new(stream, UploadMetadata::new(), &fixture.context()).unwrap();

        let err = upload.move_to(fixture.missing_dir_path()).unwrap_err();
        assert!(matches!(
            err,
            UploadError::InvalidArgument(TargetError::TargetDirMissing { .. })
        ));

        let err = upload.move_to("").unwrap_err();
        assert!(matches!(
            err,
            UploadError::InvalidArgument(TargetError::EmptyPath)
        ));

        assert!(generated.tmp_path.exists());
        assert!(upload.stream().is_ok());
    }
}

#[test]
fn test_unreachable_source_fails_move() {
    let mut fixture = UploadFixture::new().unwrap();
    let generated = fixture.generate().unwrap();
    let stream = fixture.open(&generated, AccessMode::Read).unwrap();
    let mut upload = UploadedFile::new(stream, UploadMetadata::new(), &fixture.context()).unwrap();

    fs::remove_file(&generated.tmp_path).unwrap();

    let err = upload.move_to(fixture.target_path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MoveFailed);
    assert!(!upload.is_moved());

    let err = upload.stream().unwrap_err();
    assert!(matches!(
        err,
        UploadError::StreamUnavailable(StreamError::FileMissing { .. })
    ));
}

#[test]
fn test_hosted_mode_moves_registered_uploads_only() {
    let mut fixture = UploadFixture::new().unwrap();
    let context = fixture.context_with_mode(RuntimeMode::HostedByFrontend);
    let generated = fixture.generate().unwrap();
    let stream = fixture.open(&generated, AccessMode::Read).unwrap();
    let mut upload = UploadedFile::new(stream, UploadMetadata::new(), &context).unwrap();

    fixture.uploads().unregister(&generated.tmp_path);
    let err = upload.move_to(fixture.target_path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MoveFailed);
    assert!(generated.tmp_path.exists());

    fixture.uploads().register(&generated.tmp_path);
    let target = fixture.target_path();
    upload.move_to(&target).unwrap();
    assert!(target.exists());
}

#[test]
fn test_factory_end_to_end() {
    let mut fixture = UploadFixture::new().unwrap();
    let factory = fixture.factory();

    let generated = fixture.generate().unwrap();
    let stream = fixture.open(&generated, AccessMode::Read).unwrap();
    let mut upload = factory
        .create_uploaded_file(
            stream,
            Some(generated.size as i64),
            UploadErrorCode::Ok.to_native_code(),
            Some(generated.client_filename.clone()),
            Some(generated.client_media_type.clone()),
        )
        .unwrap();

    assert_eq!(upload.size(), Some(generated.size));
    upload.move_to(fixture.target_path()).unwrap();

    let generated = fixture.generate().unwrap();
    let stream = fixture.open(&generated, AccessMode::Read).unwrap();
    let upload = factory
        .create_uploaded_file(stream, Some(0), 5, Some(String::new()), None)
        .unwrap();

    assert_eq!(upload.size(), None);
    assert_eq!(upload.error(), 0);
    assert_eq!(upload.client_filename(), None);

    let path = fixture.plain_file().unwrap();
    let stream = FileStream::open(&path, AccessMode::Read).unwrap();
    let err = factory
        .create_uploaded_file(stream, None, 0, None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstructionInvalid);
}

#[test]
fn test_shared_registry_across_fixtures() {
    let uploads = EmulatedUploads::new();
    let mut first = UploadFixture::with_registry(uploads.clone()).unwrap();
    let second = UploadFixture::with_registry(uploads.clone()).unwrap();

    let generated = first.generate().unwrap();
    let stream = first.open(&generated, AccessMode::Read).unwrap();
    let upload = UploadedFile::new(stream, UploadMetadata::new(), &second.context());
    assert!(upload.is_ok());

    drop(first);
    assert!(uploads.is_empty());
}
