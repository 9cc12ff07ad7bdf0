//! # Revocation Scenarios
//!
//! Real encoded Bloom filter and partial hash list slices, served from
//! `InMemoryRevocationRepository`, evaluated by `RevocationService`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dcc_revocation::{
        CandidateHashes, ChunkSlice, DataError, HashType, InMemoryRevocationRepository,
        KidMetadata, RevocationApi, RevocationCheck, RevocationError, RevocationMode,
        RevocationService, SliceType,
    };

    use crate::fixtures::{
        bloom_slice, hash_list_slice, hash_with_prefix, partition_of, random_hash,
        CredentialHashes,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const KID: &str = "abc";

    async fn repository(
        hash_types: &[HashType],
        mode: RevocationMode,
    ) -> Arc<InMemoryRevocationRepository> {
        let repo = Arc::new(InMemoryRevocationRepository::new());
        repo.put_metadata(KID, KidMetadata::new(hash_types.iter().copied(), mode))
            .await;
        repo
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_uci_found_in_bloom_filter_slice() {
        let uci = hash_with_prefix("f0aa11");
        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        repo.add_slice(
            KID,
            partition_of(RevocationMode::Point, &uci),
            bloom_slice(&[&uci], 0.001),
        )
        .await;
        let service = RevocationService::new(repo);

        let hashes = CandidateHashes::new().with_uci(uci.clone());
        assert!(service.is_revoked(KID, &hashes).await.unwrap());
    }

    #[tokio::test]
    async fn test_absent_uci_makes_no_repository_calls_for_slices() {
        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        let service = RevocationService::new(repo.clone());

        assert!(!service
            .is_revoked(KID, &CandidateHashes::new())
            .await
            .unwrap());
        assert_eq!(repo.slice_calls(), 0);
    }

    #[tokio::test]
    async fn test_signature_found_in_hash_list_after_uci_miss() {
        let uci = hash_with_prefix("1");
        let signature = hash_with_prefix("2");
        let other_revoked = hash_with_prefix("1");

        let repo = repository(&[HashType::Uci, HashType::Signature], RevocationMode::Point).await;
        repo.add_slice(
            KID,
            partition_of(RevocationMode::Point, &uci),
            hash_list_slice(&[&other_revoked], 32),
        )
        .await;
        repo.add_slice(
            KID,
            partition_of(RevocationMode::Point, &signature),
            hash_list_slice(&[&signature], 16),
        )
        .await;
        let service = RevocationService::new(repo.clone());

        let hashes = CandidateHashes::new()
            .with_uci(uci.clone())
            .with_signature(signature.clone());
        let check = service.check(KID, &hashes).await.unwrap();

        assert_eq!(
            check,
            RevocationCheck::revoked_by(HashType::Signature, SliceType::VarHashList)
        );
        let requests = repo.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].coordinates, partition_of(RevocationMode::Point, &uci));
        assert_eq!(
            requests[1].coordinates,
            partition_of(RevocationMode::Point, &signature)
        );
    }

    #[tokio::test]
    async fn test_country_uci_in_coordinate_mode() {
        let credential = CredentialHashes::derive("DE", "URN:UVCI:01:DE:ABC123#X", b"sig-bytes");
        let mode = RevocationMode::Coordinate;

        let repo = repository(
            &[HashType::Uci, HashType::CountryCodeUci, HashType::Signature],
            mode,
        )
        .await;
        repo.add_slice(
            KID,
            partition_of(mode, &credential.country_uci),
            bloom_slice(&[&credential.country_uci], 0.0001),
        )
        .await;
        let service = RevocationService::new(repo.clone());

        let hashes = CandidateHashes::new()
            .with_uci(credential.uci.clone())
            .with_country_uci(credential.country_uci.clone())
            .with_signature(credential.signature.clone());
        let check = service.check(KID, &hashes).await.unwrap();

        assert_eq!(check.matched.unwrap().hash_type, HashType::CountryCodeUci);
        let cid_requested = repo.requests().await[1].coordinates;
        assert_eq!(cid_requested.arity(), 3);
    }

    #[tokio::test]
    async fn test_uppercase_hash_decodes() {
        let uci = hash_with_prefix("ab");
        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        let upper = uci.to_uppercase();
        repo.add_slice(
            KID,
            partition_of(RevocationMode::Point, &upper),
            hash_list_slice(&[&uci], 32),
        )
        .await;
        let service = RevocationService::new(repo);

        let hashes = CandidateHashes::new().with_uci(upper);
        assert!(service.is_revoked(KID, &hashes).await.unwrap());
    }

    #[tokio::test]
    async fn test_unrevoked_credential_with_populated_partition() {
        let revoked: Vec<String> = (0..50).map(|_| hash_with_prefix("7")).collect();
        let revoked_refs: Vec<&str> = revoked.iter().map(String::as_str).collect();
        let candidate = hash_with_prefix("7");

        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        let partition = partition_of(RevocationMode::Point, &candidate);
        repo.add_slice(KID, partition, hash_list_slice(&revoked_refs, 32))
            .await;
        let service = RevocationService::new(repo);

        let hashes = CandidateHashes::new().with_uci(candidate);
        assert!(!service.is_revoked(KID, &hashes).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_false_negatives_across_partitions() {
        let mode = RevocationMode::Vector;
        let revoked: Vec<String> = (0..200).map(|_| random_hash()).collect();

        let repo = repository(&[HashType::Signature], mode).await;
        for hash in &revoked {
            repo.add_slice(KID, partition_of(mode, hash), bloom_slice(&[hash], 0.001))
                .await;
        }
        let service = RevocationService::new(repo);

        for hash in &revoked {
            let hashes = CandidateHashes::new().with_signature(hash.clone());
            assert!(
                service.is_revoked(KID, &hashes).await.unwrap(),
                "revoked hash {} not found",
                hash
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_slice_types_ignored() {
        let uci = hash_with_prefix("c");
        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        let partition = partition_of(RevocationMode::Point, &uci);
        let future_slice: ChunkSlice =
            serde_json::from_str(r#"{"type":"XORFILTER","content":"deadbeef"}"#).unwrap();
        repo.add_slice(KID, partition, future_slice).await;
        repo.add_slice(KID, partition, hash_list_slice(&[&uci], 8))
            .await;
        let service = RevocationService::new(repo);

        let hashes = CandidateHashes::new().with_uci(uci);
        assert!(service.is_revoked(KID, &hashes).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_slice_is_a_failure_not_a_negative() {
        let uci = hash_with_prefix("d");
        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        repo.add_slice(
            KID,
            partition_of(RevocationMode::Point, &uci),
            ChunkSlice::bloom_filter(vec![0x00, 0x01, 0x00]),
        )
        .await;
        let service = RevocationService::new(repo);

        let result = service
            .is_revoked(KID, &CandidateHashes::new().with_uci(uci))
            .await;
        assert!(matches!(
            result,
            Err(RevocationError::Decode {
                hash_type: HashType::Uci,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_repository_is_a_failure() {
        let repo = repository(&[HashType::Uci], RevocationMode::Point).await;
        repo.fail_with("connection refused").await;
        let service = RevocationService::new(repo.clone());

        let result = service
            .is_revoked(KID, &CandidateHashes::new().with_uci(random_hash()))
            .await;
        assert!(matches!(
            result,
            Err(RevocationError::Data(DataError::ConnectionError(_)))
        ));

        repo.recover().await;
        assert!(!service
            .is_revoked(KID, &CandidateHashes::new().with_uci(random_hash()))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_mode_never_revokes() {
        let uci = hash_with_prefix("e");
        let repo = repository(&[HashType::Uci], RevocationMode::Unknown).await;
        let service = RevocationService::new(repo.clone());

        assert!(!service
            .is_revoked(KID, &CandidateHashes::new().with_uci(uci))
            .await
            .unwrap());
        assert_eq!(repo.slice_calls(), 0);
    }
}
